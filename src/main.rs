use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use backend::{AppState, cache::FormTokenStore, config::Config, router::create_router};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 初始化一次性表单令牌存储
    let form_tokens = Arc::new(FormTokenStore::new(config.form_token_expiration()));

    // 设置应用状态
    let state = AppState {
        config: config.clone(),
        form_tokens: form_tokens.clone(),
    };

    // 启动过期令牌的周期清理任务
    let sweep_interval = config.form_token_sweep_interval();
    let sweep_handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            let swept = form_tokens.sweep_expired().await;
            if swept > 0 {
                tracing::debug!("Swept {} expired form tokens", swept);
            }
        }
    });

    let router = create_router(state.clone());

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        // 设置开发环境的CORS，允许所有来源
        router.layer(CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
    .expect("Failed to start server");

    // 服务器退出后停掉清理任务
    sweep_handle.abort();
    tracing::info!("Server stopped");
}
