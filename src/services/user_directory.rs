use bcrypt::{hash, verify};
use rand::Rng;

use crate::database::models::{
    CreateUserInput, CreatedUser, LoginInput, NewUser, RegisterInput, UpdateUserInput, User,
    UserChanges, UserInfo, UserRole,
};
use crate::database::repositories::UserRepository;
use crate::error::AppError;
use crate::services::validation::{normalize_email, require_name, require_password};

/// Upper bound on employee-code draws before giving up
pub const MAX_CODE_ATTEMPTS: usize = 32;

/// Draw a code of the form `NNN-NNN-NNN`; the first two groups never start with zero.
pub fn random_employee_code<R: Rng>(rng: &mut R) -> String {
    format!(
        "{:03}-{:03}-{:03}",
        rng.random_range(100..=999),
        rng.random_range(100..=999),
        rng.random_range(0..=999)
    )
}

/// Hash checked against when the email is unknown, so a miss costs the same
/// bcrypt work as a wrong password.
fn dummy_password_hash(cost: u32) -> Option<String> {
    hash("vacation-desk-placeholder", cost)
        .inspect_err(|e| log::warn!("Could not prepare placeholder password hash: {}", e))
        .ok()
}

/// Owns user accounts: validation, credential hashing and uniqueness.
#[derive(Clone)]
pub struct UserDirectory {
    user_repository: UserRepository,
    bcrypt_cost: u32,
    dummy_hash: Option<String>,
}

impl UserDirectory {
    pub fn new(user_repository: UserRepository, bcrypt_cost: u32) -> Self {
        Self {
            user_repository,
            bcrypt_cost,
            dummy_hash: dummy_password_hash(bcrypt_cost),
        }
    }

    /// Self-service sign-up; the account is always an employee.
    pub async fn register(&self, input: RegisterInput) -> Result<CreatedUser, AppError> {
        let name = require_name(&input.name)?;
        let email = normalize_email(&input.email)?;
        require_password(&input.password)?;

        let user = self
            .insert(name, email, &input.password, UserRole::Employee, None)
            .await?;

        log::info!("Registered user {} with code {}", user.id, user.employee_code);

        Ok(CreatedUser {
            id: user.id,
            employee_code: user.employee_code,
        })
    }

    /// Check credentials. Every failure is the same `InvalidCredentials`.
    pub async fn authenticate(&self, input: &LoginInput) -> Result<UserInfo, AppError> {
        let email = normalize_email(&input.email).map_err(|_| AppError::InvalidCredentials)?;

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            if let Some(dummy_hash) = &self.dummy_hash {
                let _ = verify(&input.password, dummy_hash);
            }
            return Err(AppError::InvalidCredentials);
        };

        if !verify(&input.password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user.into())
    }

    /// Administrative creation: role and employee code may be chosen by the caller.
    pub async fn create_user(&self, input: CreateUserInput) -> Result<CreatedUser, AppError> {
        let name = require_name(&input.name)?;
        let email = normalize_email(&input.email)?;
        require_password(&input.password)?;

        let role = match input.role.as_deref().map(str::trim) {
            None | Some("") => UserRole::Employee,
            Some(role) => role
                .parse::<UserRole>()
                .map_err(|_| AppError::validation("Role must be employee or manager"))?,
        };

        let employee_code = input
            .employee_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        let user = self
            .insert(name, email, &input.password, role, employee_code)
            .await?;

        log::info!("Created {} {} with code {}", user.role, user.id, user.employee_code);

        Ok(CreatedUser {
            id: user.id,
            employee_code: user.employee_code,
        })
    }

    /// Apply the fields that are present; role and employee code never change here.
    pub async fn update_user(&self, id: i64, input: UpdateUserInput) -> Result<(), AppError> {
        let existing = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut changes = UserChanges::default();

        if let Some(name) = input.name {
            changes.name = Some(require_name(&name)?);
        }

        if let Some(email) = input.email {
            let email = normalize_email(&email)?;
            if email != existing.email && self.user_repository.email_exists(&email).await? {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
            changes.email = Some(email);
        }

        if let Some(password) = input.password.filter(|p| !p.is_empty()) {
            require_password(&password)?;
            changes.password_hash = Some(hash(&password, self.bcrypt_cost)?);
        }

        let updated = self
            .user_repository
            .update_user(id, &changes)
            .await
            .map_err(AppError::from_user_write)?;

        if updated == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        log::info!("Updated user {}", id);
        Ok(())
    }

    /// Delete a user and, through the cascade, their requests. Returns whether a row existed.
    pub async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self.user_repository.delete_user(id).await?;
        if deleted == 0 {
            log::warn!("Delete requested for unknown user {}", id);
        } else {
            log::info!("Deleted user {}", id);
        }
        Ok(deleted > 0)
    }

    pub async fn list_users(&self) -> Result<Vec<UserInfo>, AppError> {
        let users = self.user_repository.get_all_users().await?;
        Ok(users.into_iter().map(UserInfo::from).collect())
    }

    pub async fn find_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.user_repository.find_by_id(id).await?)
    }

    async fn insert(
        &self,
        name: String,
        email: String,
        password: &str,
        role: UserRole,
        employee_code: Option<String>,
    ) -> Result<User, AppError> {
        // Fast path for the common conflict; the UNIQUE constraint stays authoritative
        if self.user_repository.email_exists(&email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let employee_code = match employee_code {
            Some(code) => code,
            None => self.generate_employee_code().await?,
        };

        let password_hash = hash(password, self.bcrypt_cost)?;

        let new_user = NewUser {
            name,
            email,
            employee_code,
            role,
            password_hash,
        };

        self.user_repository
            .create_user(&new_user)
            .await
            .map_err(AppError::from_user_write)
    }

    async fn generate_employee_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = random_employee_code(&mut rand::rng());
            if !self.user_repository.employee_code_exists(&code).await? {
                return Ok(code);
            }
            log::debug!("Employee code {} already taken, drawing again", code);
        }

        Err(AppError::internal_server_error_message(format!(
            "Could not generate a unique employee code after {} attempts",
            MAX_CODE_ATTEMPTS
        )))
    }
}
