use crate::{error::StewardError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::get_me::*;
use steward_infra::StewardContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
