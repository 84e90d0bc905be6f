/// Rule constants shared by the validators and the host binary.

// An all-digit phone value is only accepted below this many digits.
pub const MAX_UNFORMATTED_PHONE_DIGITS: usize = 10;

/// Number of records `top` keeps when neither the CLI nor the config says otherwise.
pub const DEFAULT_SELECTION_LIMIT: usize = 10;

/// Wire names of the client record fields, used in rejection messages.
pub const FIRST_NAME_FIELD: &str = "firstName";
pub const SECOND_NAME_FIELD: &str = "secondName";
pub const PHONE_NUMBER_FIELD: &str = "phoneNumber";

/// Default config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// File name prefix for the rolling JSON log.
pub const LOG_FILE_NAME: &str = "record_pipelines.log";
