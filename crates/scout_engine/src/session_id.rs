use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

/// Generate a session identifier unique within one client: millisecond
/// timestamp plus a random hex suffix. Only one session is live at a time,
/// so cryptographic uniqueness is not required.
pub fn new_session_id() -> String {
    let mut suffix = [0u8; 6];
    OsRng.fill_bytes(&mut suffix);
    let hex: String = suffix.iter().map(|byte| format!("{byte:02x}")).collect();
    format!("session-{}-{}", Utc::now().timestamp_millis(), hex)
}
