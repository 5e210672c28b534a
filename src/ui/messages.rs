use crate::preview::validator::PortError;

/// Display language for user-facing notifications, from `preview.lang`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Zh,
}

impl Lang {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "zh" | "zh-CN" | "zh-TW" => Lang::Zh,
            _ => Lang::En,
        }
    }
}

/// Keys for the fixed set of user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    OperationSucceeded,
    ServerStarted,
    ServerStopped,
    WorkspaceCreated,
    PortInUse,
}

impl MessageKey {
    pub fn text(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (MessageKey::OperationSucceeded, Lang::En) => "operation succeeded",
            (MessageKey::OperationSucceeded, Lang::Zh) => "操作成功",
            (MessageKey::ServerStarted, Lang::En) => "preview server started",
            (MessageKey::ServerStarted, Lang::Zh) => "预览服务已启动",
            (MessageKey::ServerStopped, Lang::En) => "preview server stopped",
            (MessageKey::ServerStopped, Lang::Zh) => "预览服务已停止",
            (MessageKey::WorkspaceCreated, Lang::En) => "workspace created",
            (MessageKey::WorkspaceCreated, Lang::Zh) => "工作区已创建",
            (MessageKey::PortInUse, Lang::En) => "port is already in use",
            (MessageKey::PortInUse, Lang::Zh) => "端口已被占用",
        }
    }
}

/// Render a port validation error as a user-facing message.
pub fn port_error_text(err: &PortError, lang: Lang) -> String {
    match (err, lang) {
        (PortError::InUse(port), Lang::En) => format!("port {} is already in use", port),
        (PortError::InUse(port), Lang::Zh) => format!("端口 {} 已被占用", port),
        (PortError::NotANumber(raw), Lang::En) => format!("`{}` is not a valid port number", raw),
        (PortError::NotANumber(raw), Lang::Zh) => format!("`{}` 不是有效的端口号", raw),
        (PortError::OutOfRange(value), Lang::En) => {
            format!("port {} is outside the allowed range", value)
        }
        (PortError::OutOfRange(value), Lang::Zh) => format!("端口 {} 超出允许范围", value),
    }
}
