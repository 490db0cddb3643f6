use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and login.
///
/// Argon2 work runs on the blocking pool; callers wait for it to finish.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    admin_emails: Vec<EmailAddress>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `authenticator` - Password hashing and token handling
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            admin_emails: Vec::new(),
        }
    }

    /// Accounts registered with one of these emails also get `ADMIN`.
    pub fn with_admin_emails(mut self, admin_emails: Vec<EmailAddress>) -> Self {
        self.admin_emails = admin_emails;
        self
    }

    fn roles_for(&self, email: &EmailAddress) -> Vec<Role> {
        if self.admin_emails.contains(email) {
            vec![Role::User, Role::Admin]
        } else {
            vec![Role::User]
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let user = User {
            id: UserId::new(),
            roles: self.roles_for(&command.email),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            roles = %created_user.joined_roles(),
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let user = match EmailAddress::new(command.email) {
            Ok(email) => self.repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        // Unknown accounts still pay for a full verification.
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let password = command.password;
        let verification = tokio::task::spawn_blocking(move || {
            authenticator.verify_credentials(password.expose(), stored_hash.as_deref())
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        match verification {
            Ok(()) => {}
            Err(AuthenticationError::UnknownAccount) => return Err(UserError::UserNotFound),
            Err(AuthenticationError::InvalidCredentials) => {
                return Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => return Err(UserError::Token(e)),
        }

        let user = user.ok_or(UserError::UserNotFound)?;

        let token = self
            .authenticator
            .issue_token(&user.identity(), Utc::now())?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome { user, token })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::Password;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes",
            Duration::hours(24),
            auth::PasswordHasher::with_params(8, 1, 1).unwrap(),
        ))
    }

    fn register_command(email: &str) -> RegisterCommand {
        RegisterCommand::new(
            DisplayName::new("Juan".to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new("123456".to_string()).unwrap(),
        )
    }

    fn login_command(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: email.to_string(),
            password: Password::new(password.to_string()).unwrap(),
        }
    }

    fn stored_user(authenticator: &Authenticator, password: &str) -> User {
        User {
            id: UserId::new(),
            name: DisplayName::new("Juan".to_string()).unwrap(),
            email: EmailAddress::new("juan@mail.com".to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            roles: vec![Role::User],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_assigns_user_role() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.name.as_str() == "Juan"
                    && user.email.as_str() == "juan@mail.com"
                    && user.password_hash.starts_with("$argon2id")
                    && !user.password_hash.contains("123456")
                    && user.roles == vec![Role::User]
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let user = service
            .register(register_command("juan@mail.com"))
            .await
            .expect("Registration failed");
        assert_eq!(user.joined_roles(), "USER");
    }

    #[tokio::test]
    async fn test_register_admin_email_gets_admin_role() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| user.roles == vec![Role::User, Role::Admin])
            .times(1)
            .returning(|user| Ok(user));

        let service = AuthService::new(Arc::new(repository), authenticator())
            .with_admin_emails(vec![EmailAddress::new("boss@mail.com".to_string()).unwrap()]);

        let user = service
            .register(register_command("Boss@Mail.com"))
            .await
            .expect("Registration failed");
        assert_eq!(user.joined_roles(), "USER,ADMIN");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()))
        });

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command("juan@mail.com")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_valid_token() {
        let authenticator = authenticator();
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(&authenticator, "123456");
        let returned_user = user.clone();
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "juan@mail.com")
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let outcome = service
            .login(login_command("Juan@mail.com", "123456"))
            .await
            .expect("Login failed");

        assert_eq!(outcome.user.id, user.id);
        assert_eq!(outcome.token.split('.').count(), 3);

        let identity = authenticator
            .validate_token(&outcome.token, Utc::now())
            .expect("Issued token should validate");
        assert_eq!(identity, user.identity());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let authenticator = authenticator();
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(&authenticator, "123456");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service.login(login_command("juan@mail.com", "654321")).await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.login(login_command("nadie@mail.com", "123456")).await;
        assert!(matches!(result, Err(UserError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_login_malformed_email_is_unknown_user() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.login(login_command("not-an-email", "123456")).await;
        assert!(matches!(result, Err(UserError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_login_database_error_propagates() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.login(login_command("juan@mail.com", "123456")).await;
        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }
}
