//! 语音平台协议：请求 / 响应信封、SSML 工具

pub mod request;
pub mod response;

pub use request::{
    Application, Context, Intent, Request, RequestEnvelope, Session, SystemContext, User,
    INTENT_REQUEST, LAUNCH_REQUEST, SESSION_ENDED_REQUEST,
};
pub use response::{
    DialogDirective, Directive, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope,
};

/// 转义嵌入 SSML 的用户文本
pub fn escape_ssml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
