//! # Product Catalogue HTTP Handlers
//!
//! | 메서드 | 경로 | 권한 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/v1/products` | - | 200 OK |
//! | `GET` | `/api/v1/products/{id}` | - | 200 OK / 404 |
//! | `GET` | `/api/v1/products/quantity` | - | 200 OK |
//! | `GET` | `/api/v1/products/total-cost` | - | 200 OK |
//! | `GET` | `/api/v1/products/avg-price` | - | 200 OK |
//! | `POST` | `/api/v1/products` | `ROLE_ADMIN` | 201 Created |
//! | `PUT` | `/api/v1/products/{id}` | `ROLE_ADMIN` | 200 OK |
//! | `DELETE` | `/api/v1/products/{id}` | `ROLE_ADMIN` | 204 No Content |
//! | `DELETE` | `/api/v1/products/by-title/{title}` | `ROLE_ADMIN` | 204 No Content |
//! | `PUT` | `/api/v1/products/{id}/restore` | `ROLE_ADMIN` | 200 OK |
//!
//! 쓰기 요청은 토큰이 없으면 401, `ROLE_ADMIN`이 없으면 403입니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use crate::core::AppContext;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::auth::authentication_request::RequiredRole;
use crate::domain::dto::products::{ProductRequest, ProductResponse};
use crate::domain::entities::roles::role::ROLE_ADMIN;
use crate::errors::AppError;

fn require_admin(user: &AuthenticatedUser) -> Result<(), AppError> {
    user.require(&RequiredRole::Single(ROLE_ADMIN.to_string()))
}

/// 판매 중인 상품 목록
#[get("")]
pub async fn list_products(ctx: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let products: Vec<ProductResponse> = ctx.product_service
        .list_active()
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(products))
}

#[get("/quantity")]
pub async fn product_quantity(ctx: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let quantity = ctx.product_service.active_count().await?;
    Ok(HttpResponse::Ok().json(json!({ "quantity": quantity })))
}

#[get("/total-cost")]
pub async fn product_total_cost(ctx: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let total_cost = ctx.product_service.active_total_cost().await?;
    Ok(HttpResponse::Ok().json(json!({ "totalCost": total_cost })))
}

#[get("/avg-price")]
pub async fn product_average_price(ctx: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let average_price = ctx.product_service.active_average_price().await?;
    Ok(HttpResponse::Ok().json(json!({ "averagePrice": average_price })))
}

#[get("/{id}")]
pub async fn get_product(
    ctx: web::Data<AppContext>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product = ctx.product_service.get_active(&id).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// 상품 등록
#[post("")]
pub async fn create_product(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    payload: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&user)?;

    let product = ctx.product_service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

#[put("/{id}")]
pub async fn update_product(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&user)?;

    let product = ctx.product_service.update(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// 소프트 삭제
#[delete("/{id}")]
pub async fn delete_product(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&user)?;

    ctx.product_service.deactivate(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/by-title/{title}")]
pub async fn delete_product_by_title(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    title: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&user)?;

    ctx.product_service.deactivate_by_title(&title).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/{id}/restore")]
pub async fn restore_product(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&user)?;

    let product = ctx.product_service.restore(&id).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}
