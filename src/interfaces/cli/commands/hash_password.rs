//! hash-password 命令：打印 `admin.key` 配置项的取值

use std::io::{self, BufRead};

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::digest_password;

/// 命令行参数优先，否则从 stdin 读一行
pub fn read_password(password: Option<String>, input: impl BufRead) -> Result<String, CliError> {
    if let Some(pwd) = password {
        return Ok(pwd);
    }

    let mut line = String::new();
    let mut input = input;
    input
        .read_line(&mut line)
        .map_err(|e| CliError::CommandError(format!("Failed to read from stdin: {}", e)))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn hash_password(password: Option<String>) -> Result<(), CliError> {
    let password = read_password(password, io::stdin().lock())?;
    if password.is_empty() {
        return Err(CliError::ParseError("password must not be empty".to_string()));
    }

    eprintln!("{} Put this into [admin] key or ADMIN_KEY:", "ℹ".bold().blue());
    println!("{}", digest_password(&password));
    Ok(())
}
