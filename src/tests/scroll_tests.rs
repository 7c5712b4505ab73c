//! 滚动物理与边缘事件测试

use crate::ui::scroll_controller::{ScrollController, ScrollEvent};

/// 推进动画直到停止，收集触发的事件
fn run_until_idle(scroll: &mut ScrollController) -> Vec<ScrollEvent> {
    let mut events = Vec::new();
    for _ in 0..1000 {
        let (animating, event) = scroll.update(1.0 / 60.0);
        if let Some(e) = event {
            events.push(e);
        }
        if !animating {
            break;
        }
    }
    events
}

#[test]
fn test_wheel_scroll_clamps_to_bounds() {
    let mut scroll = ScrollController::new(2000.0, 600.0);
    scroll.handle_scroll(-100.0, true);
    assert_eq!(scroll.position(), 0.0);

    scroll.handle_scroll(99999.0, true);
    assert_eq!(scroll.position(), scroll.max_scroll());
}

#[test]
fn test_wheel_reach_bottom_fires_once() {
    let mut scroll = ScrollController::new(2000.0, 600.0);
    scroll.handle_scroll(99999.0, true);
    assert!(scroll.check_reach_bottom());
    // 守卫位阻止重复触发
    scroll.handle_scroll(10.0, true);
    assert!(!scroll.check_reach_bottom());
}

#[test]
fn test_reach_bottom_rearms_after_content_growth() {
    let mut scroll = ScrollController::new(1000.0, 600.0);
    scroll.handle_scroll(99999.0, true);
    assert!(scroll.check_reach_bottom());

    // 内容变高后重新武装，再次滚到底部可再触发
    scroll.update_content_height(2000.0, 600.0);
    assert!(!scroll.check_reach_bottom());
    scroll.handle_scroll(99999.0, true);
    assert!(scroll.check_reach_bottom());
}

#[test]
fn test_no_reach_bottom_when_content_fits_viewport() {
    let mut scroll = ScrollController::new(400.0, 600.0);
    scroll.handle_scroll(100.0, true);
    assert_eq!(scroll.position(), 0.0);
    assert!(!scroll.check_reach_bottom());
}

#[test]
fn test_inertia_scroll_triggers_reach_bottom() {
    let mut scroll = ScrollController::new(1000.0, 600.0);

    // 快速上滑甩出惯性，足以冲到底部
    scroll.begin_drag(500.0, 0);
    scroll.update_drag(350.0, 40);
    scroll.update_drag(200.0, 80);
    scroll.end_drag();
    assert!(scroll.is_animating());

    let events = run_until_idle(&mut scroll);
    assert_eq!(events, vec![ScrollEvent::ReachBottom]);
    assert_eq!(scroll.position(), scroll.max_scroll());

    // 停在底部继续推进不再触发
    let events = run_until_idle(&mut scroll);
    assert!(events.is_empty());
}

#[test]
fn test_pull_past_threshold_triggers_refresh() {
    let mut scroll = ScrollController::new(2000.0, 600.0);

    // 从顶部大幅下拉（橡皮筋衰减后仍超过刷新阈值）
    scroll.begin_drag(100.0, 0);
    scroll.update_drag(400.0, 100);
    assert!(scroll.pull_distance() > 60.0);
    scroll.end_drag();

    let events = run_until_idle(&mut scroll);
    assert_eq!(events, vec![ScrollEvent::ReachTop]);
    assert_eq!(scroll.position(), 0.0);
}

#[test]
fn test_small_pull_does_not_trigger_refresh() {
    let mut scroll = ScrollController::new(2000.0, 600.0);

    scroll.begin_drag(100.0, 0);
    scroll.update_drag(130.0, 100);
    assert!(scroll.pull_distance() < 60.0);
    scroll.end_drag();

    let events = run_until_idle(&mut scroll);
    assert!(events.is_empty());
}

#[test]
fn test_rubber_band_resists_overscroll() {
    let mut scroll = ScrollController::new(2000.0, 600.0);
    scroll.begin_drag(100.0, 0);
    scroll.update_drag(400.0, 100);
    // 拖了 300，橡皮筋让实际位移远小于手指位移
    let pull = scroll.pull_distance();
    assert!(pull > 0.0 && pull < 300.0);
}

#[test]
fn test_release_inside_bounds_without_velocity_stays_put() {
    let mut scroll = ScrollController::new(2000.0, 600.0);
    scroll.handle_scroll(500.0, true);

    scroll.begin_drag(300.0, 0);
    scroll.update_drag(295.0, 400);
    scroll.end_drag();
    assert!(!scroll.is_animating());
    let events = run_until_idle(&mut scroll);
    assert!(events.is_empty());
}
