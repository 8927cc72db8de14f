//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use std::sync::Arc;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use actix_web::http::header::AUTHORIZATION;
use futures_util::future::LocalBoxFuture;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::token::token::KeyDomain;
use crate::services::auth::{ClaimsMapper, TokenService};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub token_service: Arc<TokenService>,
    pub claims_mapper: Arc<ClaimsMapper>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let token_service = self.token_service.clone();
        let claims_mapper = self.claims_mapper.clone();

        Box::pin(async move {
            if let Some(user) = authenticate(&req, &token_service, &claims_mapper).await {
                log::debug!("인증 성공: {} {:?}", user.username, user.role_titles());
                req.extensions_mut().insert(user);
            }

            // 인증 결과와 관계없이 다음 서비스로 전달
            service.call(req).await
        })
    }
}

/// 요청의 Bearer 토큰을 검증하고 신뢰 표시된 신원을 만듭니다.
///
/// 헤더가 없거나 토큰이 유효하지 않으면 `None`입니다.
async fn authenticate(
    req: &ServiceRequest,
    token_service: &TokenService,
    claims_mapper: &ClaimsMapper,
) -> Option<AuthenticatedUser> {
    let auth_header = req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let token = TokenService::extract_bearer_token(auth_header)?;

    if !token_service.verify(token, KeyDomain::Access) {
        log::debug!("유효하지 않은 access 토큰, 미인증으로 진행: {}", req.path());
        return None;
    }

    let claims = match token_service.decode_claims(token, KeyDomain::Access) {
        Ok(claims) => claims,
        Err(e) => {
            log::error!("{}", e);
            return None;
        }
    };

    match claims_mapper.map_claims_to_identity(&claims).await {
        Ok(mut user) => {
            user.mark_authenticated();
            Some(user)
        }
        Err(e) => {
            log::error!("역할 조회 실패로 미인증 진행: {}", e);
            None
        }
    }
}
