use super::*;

#[test]
fn link_label_is_one_based() {
    assert_eq!(link_label(0), "1");
    assert_eq!(link_label(2), "3");
}

#[test]
fn link_class_marks_active_page() {
    assert_eq!(link_class(true), "pagination__link pagination__link--active");
    assert_eq!(link_class(false), "pagination__link");
}

fn three_pages() -> Vec<ViewFn> {
    vec![ViewFn::from(|| "a"), ViewFn::from(|| "b"), ViewFn::from(|| "c")]
}

fn position(controller: Controller) -> usize {
    controller.with_untracked(StepController::position)
}

#[test]
fn empty_page_list_is_rejected() {
    let owner = Owner::new();
    owner.set();
    let focus_seq = RwSignal::new(0_u64);
    assert!(new_controller(Vec::new(), focus_seq).is_err());
}

#[test]
fn jump_request_moves_form_and_requests_scroll() {
    let owner = Owner::new();
    owner.set();
    let focus_seq = RwSignal::new(0_u64);
    let controller = new_controller(three_pages(), focus_seq).unwrap();
    let request = RwSignal::new(Some(2));

    assert!(take_jump_request(controller, request));
    assert_eq!(position(controller), 2);
    assert_eq!(focus_seq.get_untracked(), 1);
    assert!(scroll_pending(focus_seq.get_untracked()));
    assert_eq!(request.get_untracked(), None);
}

#[test]
fn out_of_range_jump_request_is_cleared_without_moving() {
    let owner = Owner::new();
    owner.set();
    let focus_seq = RwSignal::new(0_u64);
    let controller = new_controller(three_pages(), focus_seq).unwrap();
    let request = RwSignal::new(Some(7));

    assert!(take_jump_request(controller, request));
    assert_eq!(position(controller), 0);
    assert_eq!(focus_seq.get_untracked(), 0);
    assert_eq!(request.get_untracked(), None);
}

#[test]
fn jump_request_for_current_page_does_not_scroll() {
    let owner = Owner::new();
    owner.set();
    let focus_seq = RwSignal::new(0_u64);
    let controller = new_controller(three_pages(), focus_seq).unwrap();
    let request = RwSignal::new(Some(0));

    assert!(take_jump_request(controller, request));
    assert_eq!(focus_seq.get_untracked(), 0);
    assert!(!scroll_pending(focus_seq.get_untracked()));
    assert_eq!(request.get_untracked(), None);
}

#[test]
fn no_pending_request_is_a_no_op() {
    let owner = Owner::new();
    owner.set();
    let focus_seq = RwSignal::new(0_u64);
    let controller = new_controller(three_pages(), focus_seq).unwrap();
    let request = RwSignal::new(None);

    assert!(!take_jump_request(controller, request));
    assert_eq!(position(controller), 0);
}

#[test]
fn navigation_bumps_focus_seq_once_per_move() {
    let owner = Owner::new();
    owner.set();
    let focus_seq = RwSignal::new(0_u64);
    let controller = new_controller(three_pages(), focus_seq).unwrap();

    controller.update(|c| {
        c.advance();
    });
    controller.update(|c| {
        c.retreat();
    });
    controller.update(|c| {
        c.retreat();
    });
    assert_eq!(focus_seq.get_untracked(), 2);
    assert!(!scroll_pending(0));
}
