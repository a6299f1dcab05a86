//! `ghmirror sync` -- full sync then exit (spec §6 CLI surface).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ghmirror_remote::CancelToken;

use crate::context::RuntimeContext;

pub fn run(ctx: &RuntimeContext) -> anyhow::Result<()> {
    let (store, fetcher, _token) = ctx.open()?;
    let engine = ctx.engine(store, fetcher);

    let cancel = CancelToken::new();
    install_interrupt_handler(cancel.clone());

    engine.full_sync(&|p| eprintln!("fetching issues: {}/{:?}", p.current, p.total), &cancel)?;
    let soft_errors = engine.prefetch_all_comments(
        &|p| eprintln!("fetching comments: {}/{:?}", p.current, p.total),
        &cancel,
    )?;
    if !soft_errors.is_empty() {
        eprintln!("{} comment fetch(es) failed (non-fatal)", soft_errors.len());
    }
    println!("full sync complete for {}", ctx.repo);
    Ok(())
}

/// A single Ctrl+C flips the shared cancel token so the in-flight sync
/// winds down through its own cancellation checks rather than killing the
/// process mid-transaction.
fn install_interrupt_handler(cancel: CancelToken) {
    static INSTALLED: AtomicBool = AtomicBool::new(false);
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }
    let cancel = Arc::new(cancel);
    let _ = ctrlc::set_handler(move || cancel.cancel());
}
