use super::*;

#[test]
fn translate_is_deterministic_over_the_recognized_set() {
    let keys = [
        Key::Char('q'),
        Key::Char('f'),
        Key::Char('w'),
        Key::Char('s'),
        Key::Char('m'),
        Key::Char('r'),
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
    ];
    for key in keys {
        let first = translate(key);
        assert!(first.is_some(), "{key:?} should be recognized");
        assert_eq!(first, translate(key));
    }
}

#[test]
fn translate_accepts_either_letter_case() {
    assert_eq!(translate(Key::Char('w')), translate(Key::Char('W')));
    assert_eq!(translate(Key::Char('r')), translate(Key::Char('R')));
    assert_eq!(translate(Key::Char('f')), translate(Key::Char('F')));
}

#[test]
fn translate_yields_none_outside_the_alphabet() {
    for c in ['a', 'z', '1', ' ', '?'] {
        assert_eq!(translate(Key::Char(c)), None);
    }
}

#[test]
fn exit_keys_map_to_the_terminal_code() {
    assert_eq!(translate(Key::Char('q')), Some(CommandCode::Exit));
    assert_eq!(translate(Key::Char('x')), Some(CommandCode::Exit));
}

#[test]
fn arrow_wiring_matches_the_reference_client() {
    // The reference sends 'L' for the Right arrow and 'J' for the Left
    // arrow. Wire bytes are preserved even though the naming looks swapped.
    assert_eq!(translate(Key::Right), Some(CommandCode::PanLeft));
    assert_eq!(translate(Key::Left), Some(CommandCode::PanRight));
    assert_eq!(CommandCode::PanLeft.wire_byte(), b'L');
    assert_eq!(CommandCode::PanRight.wire_byte(), b'J');
}

#[test]
fn every_code_round_trips_through_its_wire_byte() {
    for code in CommandCode::ALL {
        assert_eq!(CommandCode::from_wire_byte(code.wire_byte()), Ok(code));
    }
}

#[test]
fn decode_rejects_bytes_outside_the_alphabet() {
    assert_eq!(
        Message::decode(b"Z"),
        Err(ProtocolError::UnknownCommandByte(b'Z'))
    );
}

#[test]
fn decode_rejects_wrong_length_datagrams() {
    assert_eq!(Message::decode(b""), Err(ProtocolError::UnexpectedLength(0)));
    assert_eq!(
        Message::decode(b"WX"),
        Err(ProtocolError::UnexpectedLength(2))
    );
    assert_eq!(
        Message::decode(b"WXYZ"),
        Err(ProtocolError::UnexpectedLength(4))
    );
}

#[test]
fn focus_target_encodes_as_focus_byte_plus_big_endian_value() {
    let encoded = Message::FocusTarget(300).encode();
    assert_eq!(encoded, vec![b'F', 0x01, 0x2C]);
    assert_eq!(Message::decode(&encoded), Ok(Message::FocusTarget(300)));
}

#[test]
fn only_the_focus_byte_may_carry_a_target() {
    assert_eq!(
        Message::decode(&[b'W', 0x00, 0x10]),
        Err(ProtocolError::UnexpectedLength(3))
    );
}

#[test]
fn discrete_commands_encode_as_one_byte() {
    assert_eq!(Message::Command(CommandCode::ZoomIn).encode(), vec![b'W']);
    assert_eq!(Message::Command(CommandCode::Exit).encode(), vec![b'X']);
    assert_eq!(
        Message::decode(b"R"),
        Ok(Message::Command(CommandCode::ZoomReset))
    );
}
