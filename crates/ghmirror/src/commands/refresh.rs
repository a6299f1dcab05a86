//! `ghmirror refresh` -- incremental refresh then exit (spec §6).

use ghmirror_remote::CancelToken;

use crate::context::RuntimeContext;

pub fn run(ctx: &RuntimeContext) -> anyhow::Result<()> {
    let (store, fetcher, _token) = ctx.open()?;
    let engine = ctx.engine(store, fetcher);
    let cancel = CancelToken::new();

    engine.incremental_refresh(
        &|p| eprintln!("fetching issues: {}/{:?}", p.current, p.total),
        &cancel,
    )?;
    println!("incremental refresh complete for {}", ctx.repo);
    Ok(())
}
