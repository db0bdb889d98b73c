//! Input and output formats of the command-line tool.

pub mod csv {
    pub mod lease_reader;
    pub mod schedule_writer;
}

pub mod json {
    pub mod payload_writer;
}
