use super::*;

const WINDOW: Duration = Duration::from_secs(60);

#[test]
fn allows_up_to_limit() {
    let rl = SubmissionLimiter::new(3, WINDOW);
    let now = Instant::now();

    for i in 0..3 {
        assert!(rl.reserve_at("alice", now).is_ok(), "submission {i} should be allowed");
    }
    assert_eq!(rl.reserve_at("alice", now), Err(RateLimitError::Exceeded { limit: 3, window_secs: 60 }));
}

#[test]
fn rejected_reservation_records_nothing() {
    let rl = SubmissionLimiter::new(1, WINDOW);
    let start = Instant::now();
    rl.reserve_at("alice", start).unwrap();
    for _ in 0..5 {
        assert!(rl.reserve_at("alice", start).is_err());
    }
    // Only the first slot is in the window, so it frees up after one window.
    assert!(rl.reserve_at("alice", start + WINDOW).is_ok());
}

#[test]
fn release_returns_the_slot() {
    let rl = SubmissionLimiter::new(1, WINDOW);
    let now = Instant::now();
    let reservation = rl.reserve_at("alice", now).unwrap();
    assert!(rl.reserve_at("alice", now).is_err());

    rl.release(reservation);
    assert!(rl.reserve_at("alice", now).is_ok());
}

#[test]
fn release_removes_only_its_own_slot() {
    let rl = SubmissionLimiter::new(2, WINDOW);
    let start = Instant::now();
    let _kept = rl.reserve_at("alice", start).unwrap();
    let released = rl.reserve_at("alice", start + Duration::from_secs(1)).unwrap();
    rl.release(released);

    assert!(rl.reserve_at("alice", start + Duration::from_secs(2)).is_ok());
    assert!(rl.reserve_at("alice", start + Duration::from_secs(2)).is_err());
}

#[test]
fn release_of_last_slot_drops_user_entry() {
    let rl = SubmissionLimiter::new(2, WINDOW);
    let reservation = rl.reserve("alice").unwrap();
    assert_eq!(rl.tracked_users(), 1);
    rl.release(reservation);
    assert_eq!(rl.tracked_users(), 0);
}

#[test]
fn users_are_limited_independently() {
    let rl = SubmissionLimiter::new(1, WINDOW);
    let now = Instant::now();
    rl.reserve_at("alice", now).unwrap();
    assert!(rl.reserve_at("alice", now).is_err());
    assert!(rl.reserve_at("bob", now).is_ok());
}

#[test]
fn window_expiry_allows_new_submissions() {
    let rl = SubmissionLimiter::new(2, WINDOW);
    let start = Instant::now();
    rl.reserve_at("alice", start).unwrap();
    rl.reserve_at("alice", start).unwrap();
    assert!(rl.reserve_at("alice", start + Duration::from_secs(59)).is_err());
    assert!(rl.reserve_at("alice", start + WINDOW).is_ok());
}

#[test]
fn zero_limit_rejects_everything_without_tracking() {
    let rl = SubmissionLimiter::new(0, WINDOW);
    assert!(rl.reserve("anyone").is_err());
    assert_eq!(rl.tracked_users(), 0);
}

#[test]
fn purge_idle_drops_users_with_empty_windows() {
    let rl = SubmissionLimiter::new(3, WINDOW);
    let start = Instant::now();
    rl.reserve_at("alice", start).unwrap();
    rl.reserve_at("bob", start + Duration::from_secs(30)).unwrap();

    assert_eq!(rl.purge_idle_at(start + WINDOW), 1);
    assert_eq!(rl.tracked_users(), 1);
    assert_eq!(rl.purge_idle_at(start + Duration::from_secs(90)), 1);
    assert_eq!(rl.tracked_users(), 0);
}

#[test]
fn concurrent_reservations_never_exceed_limit() {
    let rl = SubmissionLimiter::new(3, WINDOW);
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let rl = rl.clone();
            std::thread::spawn(move || rl.reserve("alice").is_ok())
        })
        .collect();
    let granted = handles
        .into_iter()
        .map(|h| h.join().unwrap_or(false))
        .filter(|ok| *ok)
        .count();
    assert_eq!(granted, 3);
}

#[test]
fn prune_window_drops_only_stale_entries() {
    let start = Instant::now();
    let mut deque = VecDeque::from([start, start + Duration::from_secs(30), start + Duration::from_secs(90)]);
    prune_window(&mut deque, start + Duration::from_secs(100), WINDOW);
    assert_eq!(deque.len(), 1);
}

#[test]
fn error_message_names_limit_and_window() {
    let err = RateLimitError::Exceeded { limit: 3, window_secs: 86400 };
    assert_eq!(err.to_string(), "submission limit exceeded (max 3 submissions/86400s)");
}
