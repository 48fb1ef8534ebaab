//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use stock_helper_provider::{Trading212Client, Trading212Environment};
use wiremock::MockServer;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const TEST_API_KEY: &str = "key";
pub const TEST_API_SECRET: &str = "secret";
/// `Basic base64("key:secret")`
pub const TEST_AUTHORIZATION: &str = "Basic a2V5OnNlY3JldA==";

/// Client pointed at a local mock server.
pub fn mock_client(server: &MockServer) -> Trading212Client {
    Trading212Client::builder(TEST_API_KEY.to_string(), TEST_API_SECRET.to_string())
        .base_url(server.uri())
        .build()
        .unwrap()
}

/// Client for the real demo environment, if credentials are set.
pub fn demo_client() -> Option<Trading212Client> {
    let api_key = env::var("TRADING212_API_KEY").ok()?;
    let api_secret = env::var("TRADING212_API_SECRET").ok()?;
    Trading212Client::builder(api_key, api_secret)
        .environment(Trading212Environment::Demo)
        .build()
        .ok()
}
