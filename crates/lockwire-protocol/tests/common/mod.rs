//! Common test utilities for integration tests.
//!
//! This module provides helper functions and utilities shared across
//! integration tests for the Lockwire OM tracker codec.
//!
//! # Assertion Helper Philosophy
//!
//! The assertion helpers in this module follow a three-tier design:
//!
//! 1. **Creation Helpers** (`create_*`) - Build uplink wire frames and downlink responses
//! 2. **Extraction Helpers** (`parse_*`) - Decode frames and narrow packets to their report types
//! 3. **Validation Helpers** (`assert_*_complete`, `assert_report_flow`) - Validate packets and full report/acknowledge cycles
//!
//! This design reduces test boilerplate while keeping each scenario test
//! readable as a wire-level conversation.
//!
//! # Usage Examples
//!
//! ## Testing Individual Reports
//!
//! ```ignore
//! use crate::common;
//!
//! // Validate a complete heartbeat (lock state, voltage, GSM signal)
//! let packet = common::parse_packet(&common::create_heartbeat_frame(
//!     common::TEST_IMEI,
//!     "161201150000",
//!     true,
//!     "400",
//!     21,
//! ));
//! common::assert_heartbeat_complete(&packet, true, 400, 21);
//! ```
//!
//! ## Testing Complete Flows
//!
//! ```ignore
//! use crate::common;
//! use lockwire_protocol::CommandCode;
//!
//! // Validate the entire report/acknowledge cycle in one call:
//! // parse the frame, build the ack, encode it, check every ack byte
//! common::assert_report_flow(
//!     "*CMDR,OM,863725031194523,000000000000,Q0,410#",
//!     CommandCode::SIGN_IN,
//! );
//! ```
//!
//! # Design Rationale
//!
//! Creation helpers build raw frame text rather than going through the
//! packet types, so malformed variants are one string edit away and the
//! tests exercise the same parse path the TCP listener uses. Expected
//! acknowledgement bytes are rebuilt from envelope values instead of
//! comparing against `Response::encode` output, so an encoding regression
//! cannot hide behind its own golden value.

use lockwire_core::constants::{IMEI_LENGTH, RESPONSE_PREAMBLE, TIMESTAMP_PLACEHOLDER};
use lockwire_core::TrackerTimestamp;
use lockwire_protocol::commands::{
    Heartbeat, LockEvent, PositionReport, SignInReport, UpdateReport,
};
use lockwire_protocol::{CommandCode, CommandData, Packet, PacketParser, Response, ResponseBuilder};

/// Device code used by all test frames.
pub const TEST_DEVICE_CODE: &str = "OM";

/// Primary test IMEI (standard 15-digit production identifier).
pub const TEST_IMEI: &str = "863725031194523";

/// Fixed server clock used when stamping acknowledgements.
pub const SERVER_TIME: &str = "161201150000";

// ============================================================================
// Creation Helpers
// ============================================================================

/// Create a sign-in (Q0) uplink frame.
///
/// Sign-in is the first frame after boot, sent before the lock has
/// network time, so the timestamp slot carries the all-zeros placeholder.
pub fn create_signin_frame(imei: &str, voltage: &str) -> String {
    format!("*CMDR,{TEST_DEVICE_CODE},{imei},{TIMESTAMP_PLACEHOLDER},Q0,{voltage}#")
}

/// Create a heartbeat (H0) uplink frame.
pub fn create_heartbeat_frame(
    imei: &str,
    timestamp: &str,
    locked: bool,
    voltage: &str,
    gsm_signal: u8,
) -> String {
    let locked_token = if locked { "1" } else { "0" };
    format!(
        "*CMDR,{TEST_DEVICE_CODE},{imei},{timestamp},H0,{locked_token},{voltage},{gsm_signal}#"
    )
}

/// Create a lock event (L1) uplink frame.
pub fn create_lock_frame(
    imei: &str,
    timestamp: &str,
    user_id: &str,
    unlocked_at: &str,
    riding_time: &str,
) -> String {
    format!(
        "*CMDR,{TEST_DEVICE_CODE},{imei},{timestamp},L1,{user_id},{unlocked_at},{riding_time}#"
    )
}

/// Create an update report (U0) uplink frame.
///
/// Pass an empty slice for the bare `U0` frame real locks send when they
/// have nothing to report.
pub fn create_update_frame(imei: &str, fields: &[&str]) -> String {
    let mut frame = format!("*CMDR,{TEST_DEVICE_CODE},{imei},{TIMESTAMP_PLACEHOLDER},U0");
    for field in fields {
        frame.push(',');
        frame.push_str(field);
    }
    frame.push('#');
    frame
}

/// Create a position report (D0) uplink frame from raw data fields.
pub fn create_position_frame(imei: &str, timestamp: &str, data_fields: &[&str]) -> String {
    format!(
        "*CMDR,{TEST_DEVICE_CODE},{imei},{timestamp},D0,{}#",
        data_fields.join(",")
    )
}

/// Create a position report with an active satellite fix.
///
/// Coordinates are the bench reference point; every navigation slot is
/// populated.
pub fn create_active_position_frame(imei: &str) -> String {
    create_position_frame(
        imei,
        TIMESTAMP_PLACEHOLDER,
        &[
            "0",
            "205719.00",
            "A",
            "4824.07609",
            "N",
            "00959.40370",
            "E",
            "05",
            "2.02",
            "200121",
            "494.6",
            "M",
            "A",
        ],
    )
}

/// Create a position report with no satellite fix.
///
/// Navigation slots are empty, the way indoor locks report.
pub fn create_void_position_frame(imei: &str) -> String {
    create_position_frame(
        imei,
        TIMESTAMP_PLACEHOLDER,
        &[
            "0",
            "140516.00",
            "V",
            "",
            "",
            "",
            "",
            "",
            "",
            "180121",
            "",
            "",
            "N",
        ],
    )
}

/// Build the acknowledgement for a received packet.
///
/// # Panics
///
/// Panics if the timestamp token is not a valid wire timestamp or the
/// response fails to build. Test code only.
pub fn create_ack(packet: &Packet, timestamp: &str) -> Response {
    ResponseBuilder::reply_to(packet)
        .timestamp(parse_timestamp(timestamp))
        .build()
        .expect("Test helper: acknowledgement should build from a parsed packet")
}

// ============================================================================
// Extraction Helpers
// ============================================================================

/// Parse a wire frame into a packet.
///
/// # Panics
///
/// Panics with the parse error if the frame is malformed. Test code only.
pub fn parse_packet(frame: &str) -> Packet {
    PacketParser::parse(frame).expect("Test helper: frame should parse")
}

/// Parse a twelve-digit wire token into a timestamp.
///
/// # Panics
///
/// Panics if the token is malformed or is the all-zeros placeholder.
pub fn parse_timestamp(token: &str) -> TrackerTimestamp {
    TrackerTimestamp::parse_wire(token)
        .expect("Test helper: timestamp token should parse")
        .expect("Test helper: timestamp token should not be the placeholder")
}

/// Narrow a packet to its sign-in report.
///
/// # Panics
///
/// Panics if the packet carries a different command.
pub fn parse_signin(packet: &Packet) -> &SignInReport {
    match &packet.data {
        CommandData::SignIn(report) => report,
        _ => panic!(
            "Test helper: expected sign-in report, got {}",
            packet.command()
        ),
    }
}

/// Narrow a packet to its heartbeat report.
///
/// # Panics
///
/// Panics if the packet carries a different command.
pub fn parse_heartbeat(packet: &Packet) -> &Heartbeat {
    match &packet.data {
        CommandData::Heartbeat(report) => report,
        _ => panic!(
            "Test helper: expected heartbeat report, got {}",
            packet.command()
        ),
    }
}

/// Narrow a packet to its lock event.
///
/// # Panics
///
/// Panics if the packet carries a different command.
pub fn parse_lock_event(packet: &Packet) -> &LockEvent {
    match &packet.data {
        CommandData::Lock(event) => event,
        _ => panic!(
            "Test helper: expected lock event, got {}",
            packet.command()
        ),
    }
}

/// Narrow a packet to its update report.
///
/// # Panics
///
/// Panics if the packet carries a different command.
pub fn parse_update(packet: &Packet) -> &UpdateReport {
    match &packet.data {
        CommandData::Update(report) => report,
        _ => panic!(
            "Test helper: expected update report, got {}",
            packet.command()
        ),
    }
}

/// Narrow a packet to its position report.
///
/// # Panics
///
/// Panics if the packet carries a different command.
pub fn parse_position(packet: &Packet) -> &PositionReport {
    match &packet.data {
        CommandData::Position(report) => report,
        _ => panic!(
            "Test helper: expected position report, got {}",
            packet.command()
        ),
    }
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Assert the envelope fields of a parsed packet.
pub fn assert_envelope(packet: &Packet, device_code: &str, imei: &str) {
    assert_eq!(
        packet.device_code.as_str(),
        device_code,
        "Device code mismatch"
    );
    assert_eq!(packet.imei.as_str(), imei, "IMEI mismatch");
}

/// Validate a complete sign-in packet: envelope, command, and voltage.
pub fn assert_signin_complete(packet: &Packet, imei: &str, centivolts: u16) {
    assert_envelope(packet, TEST_DEVICE_CODE, imei);
    assert_eq!(packet.command(), CommandCode::SIGN_IN);
    assert!(
        !packet.has_timestamp(),
        "Sign-in reports carry the placeholder timestamp"
    );
    let report = parse_signin(packet);
    assert_eq!(report.voltage().centivolts(), centivolts, "Voltage mismatch");
}

/// Validate a complete heartbeat packet: command, lock state, voltage,
/// and GSM signal.
pub fn assert_heartbeat_complete(packet: &Packet, locked: bool, centivolts: u16, gsm_signal: u8) {
    assert_eq!(packet.command(), CommandCode::HEARTBEAT);
    let report = parse_heartbeat(packet);
    assert_eq!(report.is_locked(), locked, "Lock state mismatch");
    assert_eq!(report.voltage().centivolts(), centivolts, "Voltage mismatch");
    assert_eq!(report.gsm_signal(), gsm_signal, "GSM signal mismatch");
}

/// Validate a complete lock event packet, byte-exact on every field.
pub fn assert_lock_complete(packet: &Packet, user_id: &str, unlocked_at: &str, riding_time: &str) {
    assert_eq!(packet.command(), CommandCode::LOCK);
    let event = parse_lock_event(packet);
    assert_eq!(event.user_id().as_str(), user_id, "User ID mismatch");
    assert_eq!(
        event.unlocked_at().as_str(),
        unlocked_at,
        "Unlock timestamp mismatch"
    );
    assert_eq!(
        event.riding_time().as_str(),
        riding_time,
        "Riding time mismatch"
    );
}

/// Assert the exact bytes of an encoded acknowledgement.
///
/// Checks the modem wake-up preamble, then rebuilds the expected frame
/// text from the envelope values and compares byte-for-byte.
pub fn assert_ack_bytes(
    bytes: &[u8],
    device_code: &str,
    imei: &str,
    timestamp: &str,
    echoed: CommandCode,
) {
    assert!(
        bytes.len() > RESPONSE_PREAMBLE.len(),
        "Acknowledgement is too short to carry a frame"
    );
    assert_eq!(
        &bytes[..RESPONSE_PREAMBLE.len()],
        &RESPONSE_PREAMBLE,
        "Acknowledgement must start with the modem wake-up preamble"
    );

    let body = std::str::from_utf8(&bytes[RESPONSE_PREAMBLE.len()..])
        .expect("Test helper: acknowledgement body should be ASCII text");
    let expected = format!("*CMDS,{device_code},{imei},{timestamp},Re,{echoed}#");
    assert_eq!(body, expected, "Acknowledgement body mismatch");
}

/// Validate a complete report/acknowledge cycle in one call.
///
/// Parses the uplink frame, checks the command code, builds the
/// acknowledgement stamped with [`SERVER_TIME`], encodes it, and checks
/// every byte of the result. Returns the parsed packet so the caller can
/// continue with command-specific assertions.
pub fn assert_report_flow(frame: &str, expected: CommandCode) -> Packet {
    let packet = parse_packet(frame);
    assert_eq!(
        packet.command(),
        expected,
        "Report carries the wrong command code"
    );

    let ack = create_ack(&packet, SERVER_TIME);
    let bytes = ack.encode();
    assert_ack_bytes(
        &bytes,
        packet.device_code.as_str(),
        packet.imei.as_str(),
        SERVER_TIME,
        expected,
    );
    packet
}

// ============================================================================
// Test Data Generators
// ============================================================================

/// Generate a unique test IMEI from a serial number.
///
/// Produces standard 15-digit identifiers sharing the bench TAC prefix,
/// so fleets of distinct devices are cheap to fake.
pub fn test_imei(serial: u16) -> String {
    let imei = format!("86372503119{serial:04}");
    assert_eq!(imei.len(), IMEI_LENGTH, "Test helper: IMEI length drifted");
    imei
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_signin_frame_shape() {
        let frame = create_signin_frame(TEST_IMEI, "410");
        assert_eq!(frame, "*CMDR,OM,863725031194523,000000000000,Q0,410#");
    }

    #[test]
    fn test_create_heartbeat_frame_shape() {
        let frame = create_heartbeat_frame(TEST_IMEI, "161201150000", true, "400", 21);
        assert_eq!(
            frame,
            "*CMDR,OM,863725031194523,161201150000,H0,1,400,21#"
        );

        let unlocked = create_heartbeat_frame(TEST_IMEI, "161201150000", false, "395", 9);
        assert_eq!(
            unlocked,
            "*CMDR,OM,863725031194523,161201150000,H0,0,395,9#"
        );
    }

    #[test]
    fn test_create_lock_frame_shape() {
        let frame = create_lock_frame(TEST_IMEI, "161201150000", "1", "1497689816", "20");
        assert_eq!(
            frame,
            "*CMDR,OM,863725031194523,161201150000,L1,1,1497689816,20#"
        );
    }

    #[test]
    fn test_create_update_frame_with_and_without_fields() {
        let bare = create_update_frame(TEST_IMEI, &[]);
        assert_eq!(bare, "*CMDR,OM,863725031194523,000000000000,U0#");

        let loaded = create_update_frame(TEST_IMEI, &["V1.2", "Mar 13 2020"]);
        assert_eq!(
            loaded,
            "*CMDR,OM,863725031194523,000000000000,U0,V1.2,Mar 13 2020#"
        );
    }

    #[test]
    fn test_create_position_frames() {
        let active = create_active_position_frame(TEST_IMEI);
        assert!(active.contains(",D0,0,205719.00,A,"));
        assert!(active.ends_with(",494.6,M,A#"));

        let void = create_void_position_frame(TEST_IMEI);
        assert!(void.contains(",D0,0,140516.00,V,,,,,,"));
        assert!(void.ends_with(",180121,,,N#"));
    }

    #[test]
    fn test_parse_packet_helper() {
        let packet = parse_packet(&create_signin_frame(TEST_IMEI, "410"));
        assert_envelope(&packet, TEST_DEVICE_CODE, TEST_IMEI);
        assert_eq!(packet.command(), CommandCode::SIGN_IN);
    }

    #[test]
    #[should_panic(expected = "Test helper: frame should parse")]
    fn test_parse_packet_helper_panics_on_garbage() {
        parse_packet("not a frame");
    }

    #[test]
    fn test_parse_timestamp_helper() {
        let ts = parse_timestamp(SERVER_TIME);
        assert_eq!(ts.format_wire(), SERVER_TIME);
    }

    #[test]
    fn test_extraction_helpers_narrow_each_command() {
        let signin = parse_packet(&create_signin_frame(TEST_IMEI, "410"));
        assert_eq!(parse_signin(&signin).voltage().centivolts(), 410);

        let heartbeat = parse_packet(&create_heartbeat_frame(
            TEST_IMEI,
            SERVER_TIME,
            true,
            "400",
            21,
        ));
        assert!(parse_heartbeat(&heartbeat).is_locked());

        let lock = parse_packet(&create_lock_frame(
            TEST_IMEI,
            SERVER_TIME,
            "1",
            "1497689816",
            "20",
        ));
        assert_eq!(
            parse_lock_event(&lock).unlocked_at().as_str(),
            "1497689816"
        );

        let update = parse_packet(&create_update_frame(TEST_IMEI, &["V1.2"]));
        assert_eq!(parse_update(&update).fields().len(), 1);

        let position = parse_packet(&create_active_position_frame(TEST_IMEI));
        assert!(parse_position(&position).has_fix());
    }

    #[test]
    #[should_panic(expected = "expected heartbeat report")]
    fn test_extraction_helper_panics_on_wrong_command() {
        let packet = parse_packet(&create_signin_frame(TEST_IMEI, "410"));
        parse_heartbeat(&packet);
    }

    #[test]
    fn test_assert_complete_helpers() {
        let signin = parse_packet(&create_signin_frame(TEST_IMEI, "410"));
        assert_signin_complete(&signin, TEST_IMEI, 410);

        let heartbeat = parse_packet(&create_heartbeat_frame(
            TEST_IMEI,
            SERVER_TIME,
            false,
            "395",
            9,
        ));
        assert_heartbeat_complete(&heartbeat, false, 395, 9);

        let lock = parse_packet(&create_lock_frame(
            TEST_IMEI,
            SERVER_TIME,
            "007",
            "0001497689816",
            "020",
        ));
        assert_lock_complete(&lock, "007", "0001497689816", "020");
    }

    #[test]
    fn test_create_ack_and_assert_ack_bytes() {
        let packet = parse_packet(&create_heartbeat_frame(
            TEST_IMEI,
            SERVER_TIME,
            true,
            "400",
            21,
        ));
        let ack = create_ack(&packet, SERVER_TIME);
        assert_eq!(ack.data.as_str(), "H0");

        let bytes = ack.encode();
        assert_ack_bytes(
            &bytes,
            TEST_DEVICE_CODE,
            TEST_IMEI,
            SERVER_TIME,
            CommandCode::HEARTBEAT,
        );
    }

    #[test]
    fn test_assert_report_flow_returns_packet() {
        let packet = assert_report_flow(
            &create_signin_frame(TEST_IMEI, "410"),
            CommandCode::SIGN_IN,
        );
        assert_signin_complete(&packet, TEST_IMEI, 410);
    }

    #[test]
    fn test_test_imei_generator() {
        assert_eq!(test_imei(0), "863725031190000");
        assert_eq!(test_imei(42), "863725031190042");
        assert_eq!(test_imei(0).len(), IMEI_LENGTH);
        assert_ne!(test_imei(1), test_imei(2));
    }
}
