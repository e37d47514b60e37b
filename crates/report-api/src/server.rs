//! HTTP 서버 실행.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::routes::create_router;
use crate::state::AppState;

/// 라우터를 `listener`에 띄웁니다.
///
/// `shutdown`이 완료되면 새 연결을 받지 않고, 진행 중인 요청을 마친 뒤 반환합니다.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
