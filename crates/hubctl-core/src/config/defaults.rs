pub(super) fn default_poll_interval() -> u64 {
    5
}
pub(super) fn default_max_concurrent() -> usize {
    32
}
pub(super) fn default_run_as() -> String {
    "root".to_string()
}
