// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Employee accounts and credentials.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::password::PasswordHasher;
use crate::store::EmployeeStore;
use crate::types::{Employee, EmployeeChange, EmployeeId, NewEmployee, Page, PageRequest, Role};
use crate::validation::ValidationErrors;

// =============================================================================
// Inputs
// =============================================================================

/// Registration form.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEmployee {
    /// Login handle, 3 to 30 characters.
    #[serde(default)]
    pub username: String,
    /// Given name, 2 to 40 characters.
    #[serde(default)]
    pub name: String,
    /// Family name, 2 to 40 characters.
    #[serde(default)]
    pub surname: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Plain text password.
    #[serde(default)]
    pub password: String,
}

impl RegisterEmployee {
    /// Validates every field.
    pub fn validate(&self) -> CoreResult<()> {
        let mut errors = ValidationErrors::new();
        errors.length("username", &self.username, 3, 30);
        errors.length("name", &self.name, 2, 40);
        errors.length("surname", &self.surname, 2, 40);
        errors.email("email", &self.email);
        errors.password("password", &self.password);
        errors.into_result()
    }
}

impl fmt::Debug for RegisterEmployee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterEmployee")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Profile update form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    /// Given name.
    #[serde(default)]
    pub name: String,
    /// Family name.
    #[serde(default)]
    pub surname: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

impl UpdateEmployee {
    /// Validates every field.
    pub fn validate(&self) -> CoreResult<()> {
        let mut errors = ValidationErrors::new();
        errors.length("name", &self.name, 2, 40);
        errors.length("surname", &self.surname, 2, 40);
        errors.email("email", &self.email);
        errors.into_result()
    }
}

// =============================================================================
// EmployeeService
// =============================================================================

/// Account management on top of an [`EmployeeStore`].
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
    hasher: PasswordHasher,
}

impl EmployeeService {
    /// Creates the service.
    pub fn new(store: Arc<dyn EmployeeStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Creates an account with the given role.
    ///
    /// Fails with `Conflict` if the username or email is already taken.
    pub async fn register(&self, input: RegisterEmployee, role: Role) -> CoreResult<Employee> {
        input.validate()?;

        let username = input.username.trim().to_string();
        let email = input.email.trim().to_string();

        if self.store.username_exists(&username).await? {
            return Err(CoreError::conflict("Username already in use"));
        }
        if self.store.email_exists(&email).await? {
            return Err(CoreError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let employee = self
            .store
            .insert_employee(NewEmployee {
                username,
                name: input.name.trim().to_string(),
                surname: input.surname.trim().to_string(),
                email,
                password_hash,
                role,
            })
            .await?;

        info!(employee_id = %employee.id, username = %employee.username, role = %employee.role, "Employee registered");
        Ok(employee)
    }

    /// Checks an email and password pair.
    ///
    /// Unknown email and wrong password both fail with
    /// [`CoreError::InvalidCredentials`].
    pub async fn authenticate(&self, email: &str, password: &str) -> CoreResult<Employee> {
        let Some(employee) = self.store.find_employee_by_email(email.trim()).await? else {
            debug!("Login for unknown email");
            return Err(CoreError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &employee.password_hash).await? {
            debug!(employee_id = %employee.id, "Login with wrong password");
            return Err(CoreError::InvalidCredentials);
        }

        Ok(employee)
    }

    /// Returns an employee or `NotFound`.
    pub async fn get(&self, id: EmployeeId) -> CoreResult<Employee> {
        self.store
            .find_employee(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Employee", id))
    }

    /// Returns an employee if it exists.
    pub async fn find(&self, id: EmployeeId) -> CoreResult<Option<Employee>> {
        self.store.find_employee(id).await
    }

    /// Lists employees.
    pub async fn list(&self, page: PageRequest) -> CoreResult<Page<Employee>> {
        self.store.list_employees(page).await
    }

    /// Updates name, surname and email.
    ///
    /// Email uniqueness is decided by the store, which ignores the
    /// employee's own address in any letter case.
    pub async fn update(&self, id: EmployeeId, input: UpdateEmployee) -> CoreResult<Employee> {
        input.validate()?;
        let change = EmployeeChange::Profile {
            name: input.name.trim().to_string(),
            surname: input.surname.trim().to_string(),
            email: input.email.trim().to_string(),
        };
        self.store.update_employee(id, change).await
    }

    /// Deletes an employee. Fails with `Conflict` if it has bookings.
    pub async fn delete(&self, id: EmployeeId) -> CoreResult<()> {
        self.store.delete_employee(id).await?;
        info!(employee_id = %id, "Employee deleted");
        Ok(())
    }

    /// Sets the avatar URL.
    pub async fn set_avatar(&self, id: EmployeeId, url: &str) -> CoreResult<Employee> {
        let mut errors = ValidationErrors::new();
        errors.http_url("avatarUrl", url);
        errors.max_length("avatarUrl", Some(url), 2048);
        errors.into_result()?;

        self.store
            .update_employee(id, EmployeeChange::Avatar(url.to_string()))
            .await
    }

    /// Changes the role. Takes effect on the employee's next request.
    pub async fn set_role(&self, id: EmployeeId, role: Role) -> CoreResult<Employee> {
        let employee = self
            .store
            .update_employee(id, EmployeeChange::Role(role))
            .await?;
        info!(employee_id = %id, role = %role, "Employee role changed");
        Ok(employee)
    }
}

impl fmt::Debug for EmployeeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeService")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
