//! 쇼핑몰 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다.
//! 저장소와 서비스를 한 번 조립한 뒤 모든 워커가 공유합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use shop_auth_service::config::{RateLimitConfig, ServerConfig, StorageBackend, StorageConfig};
use shop_auth_service::core::{AppContext, AuthSettings, Stores};
use shop_auth_service::db::Database;
use shop_auth_service::middlewares::AuthMiddleware;
use shop_auth_service::repositories::roles::seed_default_roles;
use shop_auth_service::routes::configure_all_routes;
use shop_auth_service::services::auth::SigningKeys;
use shop_auth_service::services::confirmation::LogMailer;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 쇼핑몰 인증 서비스 시작중...");

    let stores = initialize_stores().await?;

    let created = seed_default_roles(stores.roles.as_ref()).await.map_err(io::Error::other)?;
    if created > 0 {
        info!("기본 역할 {}개 생성", created);
    }

    // 서명 키는 시작 시 한 번만 로드
    let keys = SigningKeys::from_config().map_err(io::Error::other)?;
    let ctx = AppContext::build(stores, keys, Arc::new(LogMailer::from_config()), &AuthSettings::from_config());

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(ctx).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어 실행 순서 (바깥쪽부터): 경로 정규화 → 요청 로깅 → CORS → Rate Limiting → 인증
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(ctx: AppContext) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let app_data = web::Data::new(ctx.clone());

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            .app_data(app_data.clone())
            // 인증 미들웨어 (핸들러 바로 앞)
            .wrap(AuthMiddleware::from_context(&ctx))

            // Rate Limiting 미들웨어
            .wrap(Governor::new(&governor_conf))

            // 기존 미들웨어들
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(&bind_address)?
        .workers(4)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// `STORAGE_BACKEND`에 따라 저장소를 초기화합니다
async fn initialize_stores() -> io::Result<Stores> {
    match StorageConfig::backend() {
        StorageBackend::Memory => {
            info!("🧪 메모리 저장소 사용 (재시작 시 데이터 소실)");
            Ok(Stores::in_memory())
        }
        StorageBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::new()
                .await
                .map_err(|e| io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?;

            Stores::mongodb(Arc::new(database)).await.map_err(io::Error::other)
        }
    }
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드 개발 서버(localhost:3000)와 자체 서버 간 통신을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
