pub struct ErrorCode;

impl ErrorCode {
    // Docker client errors: D1xx
    pub const DOCKER_SOCKET_UNREACHABLE: &'static str = "D100";
    pub const DOCKER_INVALID_CONTAINER_ID: &'static str = "D101";
    pub const DOCKER_DAEMON_REJECTED: &'static str = "D102";
    pub const DOCKER_RESPONSE_DECODE_FAILED: &'static str = "D103";
    pub const DOCKER_REQUEST_CANCELED: &'static str = "D104";

    // Config errors: C1xx
    pub const CONFIG_READ_FAILED: &'static str = "C100";
    pub const CONFIG_PARSE_FAILED: &'static str = "C101";
}
