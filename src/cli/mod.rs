pub mod parser;

pub mod commands {
    pub mod config;
    pub mod init;
    pub mod run;
}
