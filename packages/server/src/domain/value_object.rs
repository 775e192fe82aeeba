//! Value objects of the relay domain.
//!
//! Each constructor validates its input, so a constructed value is always
//! well-formed. Raw client input becomes a value object only through `new`
//! or `TryFrom<String>`.

use uuid::Uuid;

use super::error::ValueObjectError;

/// Longest accepted reaction symbol, in characters.
pub const MAX_REACTION_CHARS: usize = 16;

/// Opaque identifier of one live connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    /// Generate a fresh random (UUID v4) connection id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyMessageId);
        }
        Ok(Self(value))
    }

    /// Generate a fresh random (UUID v4) message id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display name of a connection. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::BlankDisplayName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Default name handed to new connections, `User-<n>`.
    pub fn numbered(n: u32) -> Self {
        Self(format!("User-{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display color as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(ValueObjectError::InvalidColor(value));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    /// Build a color from the low 24 bits of `rgb`.
    pub fn from_rgb(rgb: u32) -> Self {
        Self(format!("#{:06x}", rgb & 0x00ff_ffff))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body of a chat message. Blank text is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::BlankMessageText);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A reaction symbol such as an emoji. Any short non-blank string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReactionSymbol(String);

impl ReactionSymbol {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::BlankReaction);
        }
        if value.chars().count() > MAX_REACTION_CHARS {
            return Err(ValueObjectError::ReactionTooLong {
                max: MAX_REACTION_CHARS,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReactionSymbol {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_rejects_empty() {
        // テスト項目: 空文字列の ConnectionId は作成できない
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyConnectionId));
    }

    #[test]
    fn test_connection_id_generate_is_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert!(!first.as_str().is_empty());
    }

    #[test]
    fn test_display_name_is_trimmed() {
        // テスト項目: 表示名は前後の空白が取り除かれて保持される
        // given (前提条件):
        let value = "  alice  ".to_string();

        // when (操作):
        let name = DisplayName::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_display_name_rejects_blank() {
        // テスト項目: 空文字列・空白のみの表示名は拒否される
        // given (前提条件):
        let candidates = ["", "   ", "\t\n"];

        for candidate in candidates {
            // when (操作):
            let result = DisplayName::new(candidate.to_string());

            // then (期待する結果):
            assert_eq!(result, Err(ValueObjectError::BlankDisplayName));
        }
    }

    #[test]
    fn test_display_name_accepts_long_names() {
        // テスト項目: 空白でなければ長い表示名もそのまま受け付けられる
        // given (前提条件):
        let value = format!("  {}  ", "あ".repeat(35));

        // when (操作):
        let name = DisplayName::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "あ".repeat(35));
    }

    #[test]
    fn test_numbered_display_name_is_valid() {
        // テスト項目: 既定の表示名 User-<n> は検証済みの表示名と同じ値になる
        // given (前提条件):
        let n = 999;

        // when (操作):
        let name = DisplayName::numbered(n);

        // then (期待する結果):
        assert_eq!(name, DisplayName::new("User-999".to_string()).unwrap());
    }

    #[test]
    fn test_color_from_rgb_is_zero_padded() {
        // テスト項目: RGB 値は 6 桁にゼロ埋めされた #rrggbb になる
        // given (前提条件):
        let rgb = 0x00_0a_0b;

        // when (操作):
        let color = Color::from_rgb(rgb);

        // then (期待する結果):
        assert_eq!(color.as_str(), "#000a0b");
    }

    #[test]
    fn test_color_validation() {
        // テスト項目: #rrggbb 形式以外の色は拒否される
        // given (前提条件):

        // when (操作) / then (期待する結果):
        assert_eq!(Color::new("#A1B2C3".to_string()).unwrap().as_str(), "#a1b2c3");
        assert!(Color::new("a1b2c3".to_string()).is_err());
        assert!(Color::new("#a1b2c".to_string()).is_err());
        assert!(Color::new("#zzzzzz".to_string()).is_err());
    }

    #[test]
    fn test_message_text_rejects_blank() {
        // テスト項目: 空白のみのメッセージ本文は拒否される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = MessageText::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::BlankMessageText));
    }

    #[test]
    fn test_message_text_keeps_surrounding_whitespace() {
        // テスト項目: 本文は空白を含めてそのまま保持される
        // given (前提条件):
        let value = "  hi  ".to_string();

        // when (操作):
        let text = MessageText::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(text.as_str(), "  hi  ");
    }

    #[test]
    fn test_message_text_accepts_long_text() {
        // テスト項目: 本文の長さは制限されない（フレームサイズの上限のみ）
        // given (前提条件):
        let value = "x".repeat(10_000);

        // when (操作):
        let text = MessageText::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(text.as_str().len(), 10_000);
    }

    #[test]
    fn test_reaction_symbol_accepts_emoji() {
        // テスト項目: 絵文字（複数コードポイントを含む）はリアクションとして受け付けられる
        // given (前提条件):
        let value = "❤️".to_string();

        // when (操作):
        let result = ReactionSymbol::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "❤️");
    }

    #[test]
    fn test_reaction_symbol_rejects_blank_and_long() {
        // テスト項目: 空・長すぎるリアクションは拒否される
        // given (前提条件):
        let long = "x".repeat(MAX_REACTION_CHARS + 1);

        // when (操作) / then (期待する結果):
        assert_eq!(
            ReactionSymbol::new(" ".to_string()),
            Err(ValueObjectError::BlankReaction)
        );
        assert!(matches!(
            ReactionSymbol::new(long),
            Err(ValueObjectError::ReactionTooLong { .. })
        ));
    }
}
