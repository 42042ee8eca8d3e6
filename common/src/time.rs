/// Current wall-clock time as epoch milliseconds.
///
/// All persisted timestamps in this workspace are epoch-ms `u64`; callers
/// capture `now_ms` once per cycle so every decision in that cycle shares a
/// single observation time.
pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
