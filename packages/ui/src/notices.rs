use chrono::Local;
use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// User-facing notices, newest last.
#[derive(Clone, Debug, Default)]
pub struct NoticeLog {
    pub entries: Vec<Notice>,
    pub visible: bool,
}

/// Oldest notices are dropped past this many.
pub const MAX_NOTICES: usize = 50;

impl NoticeLog {
    pub fn push(&mut self, notice: Notice) {
        self.entries.push(notice);
        if self.entries.len() > MAX_NOTICES {
            let excess = self.entries.len() - MAX_NOTICES;
            self.entries.drain(..excess);
        }
    }
}

pub fn use_notices() -> Signal<NoticeLog> {
    use_context::<Signal<NoticeLog>>()
}

/// Record a notice and open the panel so the user sees it.
pub fn post_notice(log: &mut Signal<NoticeLog>, level: LogLevel, message: &str) {
    match level {
        LogLevel::Error => tracing::error!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Info | LogLevel::Success => tracing::info!("{message}"),
    }
    let mut log = log.write();
    log.push(Notice {
        timestamp: Local::now().format("%H:%M:%S").to_string(),
        level,
        message: message.to_string(),
    });
    log.visible = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(n: usize) -> Notice {
        Notice {
            timestamp: "10:00:00".to_string(),
            level: LogLevel::Info,
            message: format!("notice {n}"),
        }
    }

    #[test]
    fn test_log_keeps_newest_notices() {
        let mut log = NoticeLog::default();
        for n in 0..MAX_NOTICES + 5 {
            log.push(notice(n));
        }
        assert_eq!(log.entries.len(), MAX_NOTICES);
        assert_eq!(log.entries[0].message, "notice 5");
        assert_eq!(log.entries.last().map(|e| e.message.as_str()), Some("notice 54"));
    }
}
