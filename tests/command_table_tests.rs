use teleop::teleop::{CommandTable, Motion, QUIT_KEY};

#[test]
fn test_standard_payloads() {
    let table = CommandTable::standard();
    let expected = [
        ('w', Motion::Forward, "1,1,0,0,1,0,0,0,0,0\n"),
        ('s', Motion::Backward, "1,1,0,0,0,1,0,0,0,0\n"),
        ('a', Motion::RotateLeft, "1,1,0,0,0,0,1,0,0,0\n"),
        ('d', Motion::RotateRight, "1,1,0,0,0,0,0,1,0,0\n"),
    ];

    assert_eq!(table.len(), expected.len());
    for (command, (key, motion, payload)) in table.iter().zip(expected) {
        assert_eq!(command.key, key);
        assert_eq!(command.motion, motion);
        assert_eq!(command.payload, payload);
        assert_eq!(command.bytes(), payload.as_bytes());
    }
}

#[test]
fn test_lookup_is_stable() {
    let table = CommandTable::default();
    let first = table.lookup('a').unwrap();
    for _ in 0..100 {
        assert_eq!(table.lookup('a').unwrap(), first);
    }
    assert_eq!(first.trimmed(), "1,1,0,0,0,0,1,0,0,0");
}

#[test]
fn test_unmapped_keys() {
    let table = CommandTable::standard();
    assert!(table.lookup(QUIT_KEY).is_none());
    assert!(table.lookup('W').is_none());
    assert!(table.lookup('x').is_none());
}
