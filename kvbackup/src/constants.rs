//! Defaults and fixed values shared across the crate

/// Consul connection defaults
pub mod consul {
    /// Agent address used when nothing else is configured
    pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8500";

    /// Prefix listed by a backup; empty means the whole key space
    pub const ROOT_PREFIX: &str = "";

    /// Header carrying the ACL token
    pub const TOKEN_HEADER: &str = "X-Consul-Token";

    pub const ENV_ADDRESS: &str = "CONSUL_HTTP_ADDR";
    pub const ENV_TOKEN: &str = "CONSUL_HTTP_TOKEN";
    pub const ENV_SSL: &str = "CONSUL_HTTP_SSL";
    pub const ENV_DATACENTER: &str = "CONSUL_DATACENTER";
}

/// Object storage defaults
pub mod s3 {
    /// URL scheme selecting the remote object backend
    pub const SCHEME: &str = "s3";

    /// Region used by snapshots taken with earlier releases
    pub const DEFAULT_REGION: &str = "us-west-2";

    pub const ENV_REGION: &str = "AWS_REGION";
    pub const ENV_ENDPOINT: &str = "KVBACKUP_S3_ENDPOINT";
    pub const ENV_FORCE_PATH_STYLE: &str = "KVBACKUP_S3_FORCE_PATH_STYLE";
}

/// Snapshot document format
pub mod document {
    /// Content type stored alongside remote snapshots
    pub const CONTENT_TYPE: &str = "application/json";

    /// Permission bits for local snapshot files
    pub const FILE_MODE: u32 = 0o644;
}
