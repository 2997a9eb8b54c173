use super::*;
use crate::page::SimulatedPage;
use tokio::time::sleep;

fn setup() -> (Arc<SimulatedPage>, ScrollAnimator, Arc<AtomicBool>) {
    let page = Arc::new(SimulatedPage::new(600.0, 2600.0));
    let animator = ScrollAnimator::new(page.clone(), Duration::from_millis(16));
    (page, animator, Arc::new(AtomicBool::new(true)))
}

#[tokio::test(start_paused = true)]
async fn test_animation_reaches_target() {
    let (page, animator, active) = setup();

    // 2000 px at speed 5 -> 20 ms duration.
    let position = animator.to_bottom(5, &active).await;
    assert_eq!(position, 2000.0);
    assert_eq!(page.scroll_position(), 2000.0);
}

#[tokio::test(start_paused = true)]
async fn test_animation_back_to_top() {
    let (page, animator, active) = setup();
    page.scroll_to(2000.0);

    let position = animator.to_top(5, &active).await;
    assert_eq!(position, 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_no_op_when_already_at_target() {
    let (page, animator, active) = setup();
    page.scroll_to(2000.0);

    let position = animator.animate_to(2000.0, 5, &active).await;
    assert_eq!(position, 2000.0);
    assert_eq!(page.peak_scroll(), 2000.0);
}

#[tokio::test(start_paused = true)]
async fn test_clearing_active_flag_stops_animation_early() {
    let (page, animator, active) = setup();

    // Speed 1 -> 2000 px takes 100 frames; clear the flag partway through.
    let handle = {
        let animator = ScrollAnimator::new(page.clone(), Duration::from_millis(16));
        let active = active.clone();
        tokio::spawn(async move { animator.to_bottom(1, &active).await })
    };

    sleep(Duration::from_millis(200)).await;
    active.store(false, Ordering::SeqCst);
    let position = handle.await.unwrap();

    assert!(position > 0.0);
    assert!(position < 2000.0);
    assert_eq!(page.scroll_position(), position);
}

#[tokio::test(start_paused = true)]
async fn test_progress_is_monotonic_towards_target() {
    let (page, animator, active) = setup();

    animator.to_bottom(1, &active).await;
    assert_eq!(page.peak_scroll(), 2000.0);
    assert_eq!(page.scroll_position(), 2000.0);
}
