//! Use case tests over an in-memory repository

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use kernel::id::UserId;

use crate::application::config::UsersConfig;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::update_profile::{UpdateProfileInput, UpdateProfileUseCase};
use crate::application::view_profile::ViewProfileUseCase;
use crate::domain::entity::{NewUser, ProfileChanges, User};
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

#[derive(Default)]
struct InMemoryUsers {
    rows: Mutex<HashMap<i64, User>>,
    next_id: Mutex<i64>,
}

impl InMemoryUsers {
    fn get(&self, user_id: UserId) -> Option<User> {
        self.rows.lock().unwrap().get(&user_id.value()).cloned()
    }
}

impl UserRepository for InMemoryUsers {
    async fn insert(&self, new_user: &NewUser) -> UserResult<UserId> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = *next_id;
        self.rows.lock().unwrap().insert(
            id,
            User {
                user_id: UserId::from_i64(id),
                email: new_user.email.clone(),
                first_name: new_user.first_name.clone(),
                last_name: new_user.last_name.clone(),
                password_hash: new_user.password_hash.clone(),
                auth_token: None,
                image_filename: None,
            },
        );
        Ok(UserId::from_i64(id))
    }

    async fn find_by_id(&self, user_id: UserId) -> UserResult<Option<User>> {
        Ok(self.get(user_id))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> UserResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|user| user.auth_token.as_deref() == Some(token))
            .cloned())
    }

    async fn email_in_use(&self, email: &str) -> UserResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .any(|user| user.email == email))
    }

    async fn set_token(&self, user_id: UserId, token: &str) -> UserResult<()> {
        if let Some(user) = self.rows.lock().unwrap().get_mut(&user_id.value()) {
            user.auth_token = Some(token.to_string());
        }
        Ok(())
    }

    async fn clear_token(&self, user_id: UserId) -> UserResult<()> {
        if let Some(user) = self.rows.lock().unwrap().get_mut(&user_id.value()) {
            user.auth_token = None;
        }
        Ok(())
    }

    async fn update_profile(&self, user_id: UserId, changes: &ProfileChanges) -> UserResult<()> {
        if let Some(user) = self.rows.lock().unwrap().get_mut(&user_id.value()) {
            if let Some(email) = &changes.email {
                user.email = email.clone();
            }
            if let Some(first_name) = &changes.first_name {
                user.first_name = first_name.clone();
            }
            if let Some(last_name) = &changes.last_name {
                user.last_name = last_name.clone();
            }
            if let Some(password_hash) = &changes.password_hash {
                user.password_hash = password_hash.clone();
            }
        }
        Ok(())
    }

    async fn set_image_filename(
        &self,
        user_id: UserId,
        filename: Option<&str>,
    ) -> UserResult<()> {
        if let Some(user) = self.rows.lock().unwrap().get_mut(&user_id.value()) {
            user.image_filename = filename.map(str::to_string);
        }
        Ok(())
    }
}

fn deps() -> (Arc<InMemoryUsers>, Arc<UsersConfig>) {
    (
        Arc::new(InMemoryUsers::default()),
        Arc::new(UsersConfig::default()),
    )
}

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        email: email.to_string(),
        first_name: "Adam".to_string(),
        last_name: "Anderson".to_string(),
        password: "hunter22".to_string(),
    }
}

async fn register(repo: &Arc<InMemoryUsers>, config: &Arc<UsersConfig>, email: &str) -> UserId {
    RegisterUseCase::new(repo.clone(), config.clone())
        .execute(register_input(email))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_and_login() {
    let (repo, config) = deps();
    let user_id = register(&repo, &config, "adam@example.com").await;

    let output = LoginUseCase::new(repo.clone(), config.clone())
        .execute(LoginInput {
            email: "adam@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(output.user_id, user_id);
    assert_eq!(output.token.chars().count(), 16);
    assert_eq!(repo.get(user_id).unwrap().auth_token, Some(output.token));
}

#[tokio::test]
async fn test_register_rejects_taken_email() {
    let (repo, config) = deps();
    register(&repo, &config, "adam@example.com").await;

    let result = RegisterUseCase::new(repo.clone(), config.clone())
        .execute(register_input("adam@example.com"))
        .await;

    assert!(matches!(result, Err(UserError::EmailInUse)));
}

#[tokio::test]
async fn test_register_rejects_bad_fields() {
    let (repo, config) = deps();
    let use_case = RegisterUseCase::new(repo.clone(), config.clone());

    let mut input = register_input("not-an-email");
    assert!(matches!(
        use_case.execute(input).await,
        Err(UserError::Validation(_))
    ));

    input = register_input("adam@example.com");
    input.password = "short".to_string();
    assert!(matches!(
        use_case.execute(input).await,
        Err(UserError::Validation(_))
    ));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (repo, config) = deps();
    register(&repo, &config, "adam@example.com").await;

    let result = LoginUseCase::new(repo.clone(), config.clone())
        .execute(LoginInput {
            email: "adam@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await;

    assert!(matches!(result, Err(UserError::InvalidCredentials)));
}

#[tokio::test]
async fn test_second_login_replaces_token() {
    let (repo, config) = deps();
    register(&repo, &config, "adam@example.com").await;
    let use_case = LoginUseCase::new(repo.clone(), config.clone());

    let input = || LoginInput {
        email: "adam@example.com".to_string(),
        password: "hunter22".to_string(),
    };
    let first = use_case.execute(input()).await.unwrap();
    let second = use_case.execute(input()).await.unwrap();

    assert_ne!(first.token, second.token);
    // The first session is dead the moment the second one starts
    assert!(repo.find_by_token(&first.token).await.unwrap().is_none());
    assert!(repo.find_by_token(&second.token).await.unwrap().is_some());
}

#[tokio::test]
async fn test_logout_clears_token() {
    let (repo, config) = deps();
    let user_id = register(&repo, &config, "adam@example.com").await;
    repo.set_token(user_id, "sixteencharstokn").await.unwrap();

    let caller = repo.get(user_id).unwrap();
    LogoutUseCase::new(repo.clone()).execute(&caller).await.unwrap();

    assert!(repo.get(user_id).unwrap().auth_token.is_none());
}

#[tokio::test]
async fn test_view_profile_email_visibility() {
    let (repo, config) = deps();
    let adam = register(&repo, &config, "adam@example.com").await;
    let beth = register(&repo, &config, "beth@example.com").await;
    let use_case = ViewProfileUseCase::new(repo.clone());

    // Anonymous caller sees names only
    let profile = use_case.execute(adam, None).await.unwrap();
    assert!(profile.email.is_none());
    assert_eq!(profile.first_name, "Adam");

    // Another user sees names only
    let beth_user = repo.get(beth).unwrap();
    let profile = use_case.execute(adam, Some(&beth_user)).await.unwrap();
    assert!(profile.email.is_none());

    // The owner sees their email
    let adam_user = repo.get(adam).unwrap();
    let profile = use_case.execute(adam, Some(&adam_user)).await.unwrap();
    assert_eq!(profile.email.as_deref(), Some("adam@example.com"));
}

#[tokio::test]
async fn test_view_profile_unknown_user() {
    let (repo, _config) = deps();
    let result = ViewProfileUseCase::new(repo.clone())
        .execute(UserId::from_i64(99), None)
        .await;
    assert!(matches!(result, Err(UserError::NotFound)));
}

#[tokio::test]
async fn test_update_profile_rejects_other_users() {
    let (repo, config) = deps();
    let adam = register(&repo, &config, "adam@example.com").await;
    let beth = register(&repo, &config, "beth@example.com").await;

    let beth_user = repo.get(beth).unwrap();
    let result = UpdateProfileUseCase::new(repo.clone(), config.clone())
        .execute(adam, &beth_user, UpdateProfileInput::default())
        .await;

    assert!(matches!(result, Err(UserError::Forbidden)));
}

#[tokio::test]
async fn test_update_profile_email_rules() {
    let (repo, config) = deps();
    let adam = register(&repo, &config, "adam@example.com").await;
    register(&repo, &config, "beth@example.com").await;
    let use_case = UpdateProfileUseCase::new(repo.clone(), config.clone());
    let adam_user = repo.get(adam).unwrap();

    // Another account's address is blocked
    let result = use_case
        .execute(
            adam,
            &adam_user,
            UpdateProfileInput {
                email: Some("beth@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::EmailInUse)));

    // Resubmitting your own address is fine
    use_case
        .execute(
            adam,
            &adam_user,
            UpdateProfileInput {
                email: Some("adam@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_profile_password_rules() {
    let (repo, config) = deps();
    let adam = register(&repo, &config, "adam@example.com").await;
    let use_case = UpdateProfileUseCase::new(repo.clone(), config.clone());
    let adam_user = repo.get(adam).unwrap();

    // New password without the current one
    let result = use_case
        .execute(
            adam,
            &adam_user,
            UpdateProfileInput {
                password: Some("new-password".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::Validation(_))));

    // Wrong current password
    let result = use_case
        .execute(
            adam,
            &adam_user,
            UpdateProfileInput {
                password: Some("new-password".to_string()),
                current_password: Some("not-the-password".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::IncorrectCurrentPassword)));

    // Reusing the current password
    let result = use_case
        .execute(
            adam,
            &adam_user,
            UpdateProfileInput {
                password: Some("hunter22".to_string()),
                current_password: Some("hunter22".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::SamePassword)));

    // Valid change, then the new password logs in
    use_case
        .execute(
            adam,
            &adam_user,
            UpdateProfileInput {
                password: Some("new-password".to_string()),
                current_password: Some("hunter22".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    LoginUseCase::new(repo.clone(), config.clone())
        .execute(LoginInput {
            email: "adam@example.com".to_string(),
            password: "new-password".to_string(),
        })
        .await
        .unwrap();
}
