use photofilter_core::ImageRef;
use photofilter_history::EditHistory;

fn img(s: &str) -> ImageRef {
    ImageRef::from_base64(s)
}

#[test]
fn restore_after_filter() {
    let mut h = EditHistory::new();

    h.push_new(img("I1"));
    assert!(!h.can_restore());

    h.push_derived(img("I2"));
    assert!(h.can_restore());
    assert_eq!(h.current(), Some(&img("I2")));

    h.restore().unwrap();
    assert_eq!(h.current(), Some(&img("I1")));
    assert!(!h.can_restore());
    // restore pushes, it does not rewind
    assert_eq!(h.len(), 3);
}

#[test]
fn undo_redo_walk() {
    let mut h = EditHistory::new();
    h.push_new(img("I1"));
    h.push_derived(img("I2"));
    h.push_derived(img("I3"));

    h.undo().unwrap();
    assert_eq!(h.current(), Some(&img("I2")));
    assert!(h.can_redo());

    h.undo().unwrap();
    assert_eq!(h.current(), Some(&img("I1")));

    h.redo().unwrap();
    h.redo().unwrap();
    assert_eq!(h.current(), Some(&img("I3")));
    assert!(!h.can_redo());
}

#[test]
fn second_upload_mid_session() {
    let mut h = EditHistory::new();
    h.push_new(img("I1"));
    h.push_new(img("I2"));

    assert_eq!(h.origin_indices(), &[0, 1]);
    assert_eq!(h.current(), Some(&img("I2")));
    assert!(h.is_at_original());
}

#[test]
fn empty_history_queries() {
    let h = EditHistory::new();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert!(!h.can_restore());
    assert_eq!(h.current(), None);
    assert!(!h.is_at_original());
}

#[test]
fn undo_across_two_uploads_keeps_restore_points() {
    let mut h = EditHistory::new();
    h.push_new(img("A"));
    h.push_derived(img("A-inv"));
    h.push_new(img("B"));
    h.push_derived(img("B-gray"));
    assert_eq!(h.origin_indices(), &[0, 2]);

    // Step back below B: its marker is parked, A becomes the restore target again.
    h.undo().unwrap();
    h.undo().unwrap();
    assert_eq!(h.current(), Some(&img("A-inv")));
    assert_eq!(h.origin_indices(), &[0]);
    assert_eq!(h.origin_redo_indices(), &[2]);
    assert_eq!(h.origin(), Some(&img("A")));
    assert!(h.can_restore());

    // Growing back past position 2 brings B's marker back.
    h.redo().unwrap();
    assert_eq!(h.origin_indices(), &[0, 2]);
    assert!(h.is_at_original());
    h.redo().unwrap();
    assert_eq!(h.origin(), Some(&img("B")));
    assert!(h.can_restore());
}

#[test]
fn restore_is_undoable() {
    let mut h = EditHistory::new();
    h.push_new(img("I1"));
    h.push_derived(img("I2"));
    h.restore().unwrap();

    h.undo().unwrap();
    assert_eq!(h.current(), Some(&img("I2")));
    assert!(h.can_restore());
}

#[test]
fn undo_everything_then_upload() {
    let mut h = EditHistory::new();
    h.push_new(img("I1"));
    h.push_derived(img("I2"));
    h.undo().unwrap();
    h.undo().unwrap();
    assert!(!h.can_undo());
    assert!(h.can_redo());

    h.push_new(img("J1"));
    assert!(!h.can_redo());
    assert!(h.origin_redo_indices().is_empty());
    assert_eq!(h.origin_indices(), &[0]);
    assert_eq!(h.len(), 1);
}
