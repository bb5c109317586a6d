//! Users command - registration, sign-in checks and profiles.

use serde::Serialize;

use common::{AppError, AppResult};
use domain::{NewUser, UpdateUser, User, UserResponse};

use crate::cli::args::{UsersAction, UsersArgs};
use crate::config::UserServiceConfig;
use crate::helpers::{gravatar_for, GravatarOptions};
use crate::service::UserService;

/// Profile as displayed to other users
#[derive(Debug, Serialize)]
pub struct Profile {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Rendered `<img>` tag
    pub avatar: String,
}

impl Profile {
    pub fn new(user: &User, options: &GravatarOptions) -> Self {
        Self {
            user: UserResponse::from(user),
            avatar: gravatar_for(user, options),
        }
    }
}

/// Execute the users command
pub async fn execute(args: UsersArgs, config: &UserServiceConfig) -> AppResult<()> {
    let service = crate::connect_service(config).await?;
    run(&service, args.action, config).await
}

/// Dispatch one action against `service`.
pub async fn run(
    service: &dyn UserService,
    action: UsersAction,
    config: &UserServiceConfig,
) -> AppResult<()> {
    let avatar = GravatarOptions::with_size(config.avatar_size);

    match action {
        UsersAction::Register {
            name,
            email,
            password,
            password_confirmation,
        } => {
            let user = service
                .create_user(NewUser {
                    name,
                    email,
                    password,
                    password_confirmation,
                })
                .await?;
            print_json(&Profile::new(&user, &avatar))?;
        }
        UsersAction::Update {
            id,
            name,
            email,
            password,
            password_confirmation,
        } => {
            let input = UpdateUser {
                name,
                email,
                password,
                password_confirmation,
            };
            let user = service.update_user(id, input).await?;
            print_json(&Profile::new(&user, &avatar))?;
        }
        UsersAction::Authenticate { email, password } => {
            let user = service
                .authenticate(&email, &password)
                .await?
                .ok_or_else(|| AppError::bad_request("Invalid email/password combination"))?;
            print_json(&Profile::new(&user, &avatar))?;
        }
        UsersAction::Show { id, size } => {
            let user = service.get_user(id).await?;
            let options = size.map(GravatarOptions::with_size).unwrap_or(avatar);
            print_json(&Profile::new(&user, &options))?;
        }
        UsersAction::List => {
            let users: Vec<UserResponse> = service
                .list_users()
                .await?
                .iter()
                .map(UserResponse::from)
                .collect();
            print_json(&users)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Serialization failed: {}", e)))?;
    println!("{}", json);
    Ok(())
}
