//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every layer of the dashboard.

use serde::Serialize;

/// エラー種別の列挙体
///
/// ユーザーに見えるすべての失敗を分類します。
/// クライアント専用アプリケーションのため HTTP ステータスには対応しません。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Validation;
/// assert!(kind.is_recoverable());
/// assert_eq!(kind.as_str(), "Validation Failed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力がローカルの前提条件を満たさない（ネットワーク呼び出し前に検出）
    Validation,
    /// 認証サービスが資格情報を拒否した
    Unauthorized,
    /// 認証サービスに到達できない
    Unavailable,
    /// 内部の不変条件違反（不具合を示す）
    Internal,
}

impl ErrorKind {
    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Unavailable.as_str(), "Network Unavailable");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation Failed",
            ErrorKind::Unauthorized => "Authentication Failed",
            ErrorKind::Unavailable => "Network Unavailable",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// ユーザーが再試行できるかどうか
    ///
    /// `Internal` 以外はすべて画面に留まったまま再試行できます。
    #[inline]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
