//! JWT 인증 미들웨어
//!
//! 모든 요청에 대해 한 번, 핸들러보다 먼저 실행됩니다.
//! 유효한 access 토큰이면 신원을 요청 extensions에 설치하고, 그렇지 않으면 아무것도 설치하지 않습니다.
//! 어떤 경우에도 요청을 거부하지 않으며, 거부는 [`AuthenticatedUser`] 추출자와
//! 역할 검사가 담당합니다.
//!
//! [`AuthenticatedUser`]: crate::domain::auth::authenticated_user::AuthenticatedUser

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::core::AppContext;
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::{ClaimsMapper, TokenService};

/// JWT 인증 미들웨어
#[derive(Clone)]
pub struct AuthMiddleware {
    token_service: Arc<TokenService>,
    claims_mapper: Arc<ClaimsMapper>,
}

impl AuthMiddleware {
    pub fn new(token_service: Arc<TokenService>, claims_mapper: Arc<ClaimsMapper>) -> Self {
        Self {
            token_service,
            claims_mapper,
        }
    }

    pub fn from_context(ctx: &AppContext) -> Self {
        Self::new(ctx.token_service.clone(), ctx.claims_mapper.clone())
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
            claims_mapper: self.claims_mapper.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use chrono::Duration;
    use crate::core::testing::{grant_role, register_and_activate, test_context, test_keys};
    use crate::domain::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
    use crate::domain::auth::authentication_request::RequiredRole;
    use crate::domain::dto::users::LoginRequest;
    use crate::domain::entities::roles::role::ROLE_ADMIN;
    use crate::errors::AppError;

    async fn me(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    async fn maybe(user: OptionalUser) -> HttpResponse {
        HttpResponse::Ok().body(if user.0.is_some() { "known" } else { "anonymous" })
    }

    async fn admin(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
        user.require(&RequiredRole::Single(ROLE_ADMIN.to_string()))?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn login(ctx: &AppContext, username: &str) -> (String, String) {
        let pair = ctx.session_service
            .login(LoginRequest { username: username.into(), password: "Passw0rd!".into() })
            .await
            .unwrap();
        (pair.access_token, pair.refresh_token.unwrap())
    }

    macro_rules! app {
        ($middleware:expr) => {
            test::init_service(
                App::new()
                    .wrap($middleware)
                    .route("/me", web::get().to(me))
                    .route("/maybe", web::get().to(maybe))
                    .route("/admin", web::get().to(admin)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_request_without_header_proceeds_unauthenticated() {
        let ctx = test_context();
        let app = app!(AuthMiddleware::from_context(&ctx));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/maybe").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "anonymous");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_valid_access_token_installs_identity() {
        let ctx = test_context();
        register_and_activate(&ctx, "erin", "Passw0rd!").await;
        let (access, _) = login(&ctx, "erin").await;
        let app = app!(AuthMiddleware::from_context(&ctx));

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "erin");
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_accepted_as_bearer() {
        let ctx = test_context();
        register_and_activate(&ctx, "erin", "Passw0rd!").await;
        let (_, refresh) = login(&ctx, "erin").await;
        let app = app!(AuthMiddleware::from_context(&ctx));

        let req = test::TestRequest::get()
            .uri("/maybe")
            .insert_header(("Authorization", format!("Bearer {}", refresh)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "anonymous");
    }

    #[actix_web::test]
    async fn test_expired_and_garbage_tokens_leave_request_unauthenticated() {
        let ctx = test_context();
        register_and_activate(&ctx, "erin", "Passw0rd!").await;
        let (access, _) = login(&ctx, "erin").await;

        let expired_tokens = Arc::new(TokenService::with_ttl(test_keys(), Duration::seconds(-5), Duration::seconds(-5)));
        let expired = expired_tokens
            .issue_access_token(&AuthenticatedUser::new("erin", Default::default()))
            .unwrap();
        let app = app!(AuthMiddleware::from_context(&ctx));

        for header in [format!("Bearer {}", expired), "Bearer garbage".to_string(), format!("Token {}", access)] {
            let req = test::TestRequest::get()
                .uri("/me")
                .insert_header(("Authorization", header))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn test_admin_route_checks_role() {
        let ctx = test_context();
        register_and_activate(&ctx, "erin", "Passw0rd!").await;
        register_and_activate(&ctx, "bob", "Passw0rd!").await;
        grant_role(&ctx, "bob", ROLE_ADMIN).await;

        let (user_token, _) = login(&ctx, "erin").await;
        let (admin_token, _) = login(&ctx, "bob").await;
        let app = app!(AuthMiddleware::from_context(&ctx));

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", user_token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
