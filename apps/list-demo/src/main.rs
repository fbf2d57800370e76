mod app;

use app::{ListDemo, LOAD_MILLIS, MAX_PAGE};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("=== Refresh list demo ===");
    log::info!("each load takes {LOAD_MILLIS}ms of frame time, {MAX_PAGE} pages at most");

    let mut demo = ListDemo::new()?;

    demo.pull_header();
    demo.run_until_settled()?;

    // Keep scrolling to the end; the footer stops loading after the last page.
    for _ in 0..=MAX_PAGE {
        demo.scroll_to_end();
        demo.run_until_settled()?;
    }
    anyhow::ensure!(
        demo.page() == MAX_PAGE,
        "expected {MAX_PAGE} pages, loaded {}",
        demo.page()
    );
    anyhow::ensure!(
        !demo.controller().is_enable_swipe_footer(),
        "footer should be disabled after the last page"
    );

    demo.pull_header();
    demo.run_until_settled()?;
    log::info!(
        "done: page {} with {} items",
        demo.page(),
        demo.item_count()
    );
    Ok(())
}
