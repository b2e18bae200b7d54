use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, full_access_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::auth::AuthError;
use crate::stores::admin_store::{AdminChanges, NewAdmin};
use crate::types::dto::admin::{
    AdminOut, AdminStatusUpdate, AdminUpdateRequest, LoginRequest, RegistrationRequest, TokenResponse,
};
use crate::types::dto::common::MessageResponse;

/// Admin registration, authentication and account management endpoints
pub struct AdminApi {
    app_data: Arc<AppData>,
}

impl AdminApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Admin account management
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// Register a new admin account
    #[oai(path = "/register", method = "post", tag = "AdminTags::Admin")]
    async fn register(&self, body: Json<RegistrationRequest>) -> Result<Json<MessageResponse>, AuthError> {
        self.app_data
            .admin_store
            .register(NewAdmin {
                first_name: body.0.first_name,
                surname: body.0.surname,
                email: body.0.email,
                password: body.0.password,
                park_id: body.0.park_id,
            })
            .await?;

        Ok(Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }))
    }

    /// Login with email and password to receive an access token
    #[oai(path = "/login", method = "post", tag = "AdminTags::Admin")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let admin = self
            .app_data
            .admin_store
            .authenticate(&body.0.email, &body.0.password)
            .await?;

        let access_token = self.app_data.token_service.generate_jwt(&admin.email)?;

        Ok(Json(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            success: true,
        }))
    }

    /// Profile of the authenticated admin
    #[oai(path = "/me", method = "get", tag = "AdminTags::Admin")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<AdminOut>, AuthError> {
        let admin = current_admin(&self.app_data, &auth).await?;
        let park_name = self.app_data.admin_store.park_name(admin.park_id).await?;

        Ok(Json(AdminOut::from_model(admin, park_name)))
    }

    /// List all admin accounts with their park assignments
    #[oai(path = "/list", method = "get", tag = "AdminTags::Admin")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<AdminOut>>, AuthError> {
        current_admin(&self.app_data, &auth).await?;

        let admins = self.app_data.admin_store.list_with_park_names().await?;
        Ok(Json(
            admins
                .into_iter()
                .map(|(admin, park_name)| AdminOut::from_model(admin, park_name))
                .collect(),
        ))
    }

    /// Partially update the authenticated admin's own profile
    #[oai(path = "/edit", method = "put", tag = "AdminTags::Admin")]
    async fn edit(&self, auth: BearerAuth, body: Json<AdminUpdateRequest>) -> Result<Json<AdminOut>, AuthError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let updated = self
            .app_data
            .admin_store
            .update_self(
                admin.id,
                AdminChanges {
                    first_name: body.0.first_name,
                    surname: body.0.surname,
                    park_id: body.0.park_id,
                },
            )
            .await?;

        let park_name = self.app_data.admin_store.park_name(updated.park_id).await?;
        Ok(Json(AdminOut::from_model(updated, park_name)))
    }

    /// Set status and rights tier of another admin (full access only)
    #[oai(path = "/update_status/:admin_email", method = "put", tag = "AdminTags::Admin")]
    async fn update_status(
        &self,
        auth: BearerAuth,
        admin_email: Path<String>,
        body: Json<AdminStatusUpdate>,
    ) -> Result<Json<AdminOut>, AuthError> {
        let actor = full_access_admin(&self.app_data, &auth).await?;

        let updated = self
            .app_data
            .admin_store
            .update_status(&admin_email.0, body.0.status, body.0.rights, &actor.email)
            .await?;

        let park_name = self.app_data.admin_store.park_name(updated.park_id).await?;
        Ok(Json(AdminOut::from_model(updated, park_name)))
    }

    /// Delete an admin account (full access only), returning the removed row
    #[oai(path = "/delete/:admin_id", method = "delete", tag = "AdminTags::Admin")]
    async fn delete(&self, auth: BearerAuth, admin_id: Path<i32>) -> Result<Json<AdminOut>, AuthError> {
        let actor = full_access_admin(&self.app_data, &auth).await?;

        let deleted = self.app_data.admin_store.delete(admin_id.0, &actor.email).await?;

        Ok(Json(AdminOut::from_model(deleted, None)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{login, setup_app_data};
    use poem_openapi::auth::Bearer;

    #[tokio::test]
    async fn test_register_then_login_returns_token() {
        let app_data = setup_app_data().await;
        let api = AdminApi::new(app_data.clone());

        let result = api
            .register(Json(RegistrationRequest {
                first_name: "Test".to_string(),
                surname: "Admin".to_string(),
                email: "admin@test.com".to_string(),
                password: "testpass".to_string(),
                park_id: None,
            }))
            .await;
        assert!(result.is_ok());

        let login = api
            .login(Json(LoginRequest {
                email: "admin@test.com".to_string(),
                password: "testpass".to_string(),
            }))
            .await
            .unwrap();

        assert!(!login.0.access_token.is_empty());
        assert_eq!(login.0.token_type, "bearer");
        assert!(login.0.success);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let app_data = setup_app_data().await;
        let api = AdminApi::new(app_data.clone());

        api.register(Json(RegistrationRequest {
            first_name: "Test".to_string(),
            surname: "Admin".to_string(),
            email: "admin@test.com".to_string(),
            password: "testpass".to_string(),
            park_id: None,
        }))
        .await
        .unwrap();

        let result = api
            .login(Json(LoginRequest {
                email: "admin@test.com".to_string(),
                password: "wrong".to_string(),
            }))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_me_requires_valid_token() {
        let app_data = setup_app_data().await;
        let api = AdminApi::new(app_data.clone());

        let result = api
            .me(BearerAuth(Bearer {
                token: "garbage".to_string(),
            }))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_update_status_requires_full_access() {
        let app_data = setup_app_data().await;
        let api = AdminApi::new(app_data.clone());

        // A standard-rights admin cannot change status
        let token = login(&app_data, "standard@test.com").await;
        let result = api
            .update_status(
                BearerAuth(Bearer { token }),
                Path("standard@test.com".to_string()),
                Json(AdminStatusUpdate {
                    status: "active".to_string(),
                    rights: "full_access".to_string(),
                }),
            )
            .await;

        assert!(matches!(result, Err(AuthError::Forbidden(_))));
    }
}
