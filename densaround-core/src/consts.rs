/// Path that selects standard input (or standard output for writers).
pub const STDIN_PATH: &str = "-";

/// First two bytes of every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Initial capacity of the event buffer; it doubles from here as needed.
pub const DEFAULT_EVENT_CAPACITY: usize = 500_000;
