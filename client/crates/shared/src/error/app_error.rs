//! Application Error - User-facing error type
//!
//! Defines the [`AppError`] struct shown to the user.

use std::borrow::Cow;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// 画面に表示する失敗を表す標準エラー型です。
/// ビルダーパターンを使用してエラーを構築できます。
///
/// ## Fields
/// * `kind` - エラーの分類
/// * `message` - ユーザー向けのエラーメッセージ
/// * `action` - ユーザーが取るべきアクション（オプション）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Validation, "Password is too short")
///     .with_action("Use at least 6 characters");
/// assert_eq!(err.action(), Some("Use at least 6 characters"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
    /// ユーザーが取るべきアクション
    action: Option<Cow<'static, str>>,
}

impl AppError {
    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    /// ユーザー向けアクションを設定
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// アクションを取得
    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// 画面に留まったまま再試行できるかどうか
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        self.kind.is_recoverable()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " ({action})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::Unauthorized, "Invalid email or password");
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.message(), "Invalid email or password");
        assert!(err.action().is_none());
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::Unavailable, "Gateway unreachable");
        assert_eq!(err.to_string(), "[Network Unavailable] Gateway unreachable");

        let err = AppError::new(ErrorKind::Validation, "Name missing")
            .with_action("Please enter your full name.");
        assert_eq!(
            err.to_string(),
            "[Validation Failed] Name missing (Please enter your full name.)"
        );
    }

    #[test]
    fn test_is_recoverable() {
        assert!(AppError::new(ErrorKind::Validation, "x").is_recoverable());
        assert!(!AppError::new(ErrorKind::Internal, "x").is_recoverable());
    }
}
