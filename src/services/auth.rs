//! 教师登录校验
//!
//! 默认不启用：密码会被读取，但只有 `require_login = true` 时才真正校验。

use tracing::warn;

use crate::config::Config;
use crate::error::AuthError;

/// 登录校验
#[derive(Debug, Clone)]
pub struct LoginGate {
    password: Option<String>,
    enforce: bool,
}

impl LoginGate {
    pub fn new(config: &Config) -> Self {
        Self {
            password: config.teacher_password.clone(),
            enforce: config.require_login,
        }
    }

    pub fn is_enforced(&self) -> bool {
        self.enforce
    }

    /// 校验输入的密码
    pub fn check(&self, input: Option<&str>) -> Result<(), AuthError> {
        if !self.enforce {
            warn!("🔓 登录校验未启用，任何人都可以使用评分功能");
            return Ok(());
        }

        let input = input.ok_or(AuthError::PasswordRequired)?;
        match self.password.as_deref() {
            Some(expected) if expected == input => Ok(()),
            _ => Err(AuthError::WrongPassword),
        }
    }
}
