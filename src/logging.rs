//! Logging Module
//!
//! `tracing-subscriber`の初期化。ライブラリ側はイベントを発行するだけで、
//! サブスクライバーの登録はバイナリが行います。ログは標準エラー出力に書かれ、
//! 標準出力の診断レポートとは混ざりません。

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI用のロガーを初期化
///
/// `RUST_LOG`が設定されていればそれを優先します。
pub fn init_cli_logger(verbose: bool) {
    let default_directive = if verbose {
        "leadsheet=debug"
    } else {
        "leadsheet=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // 二重初期化（テストなど）は無視する
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
