// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! This module enforces password requirements for account credentials.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password does not meet complexity requirements.
    #[error(
        "Password must contain at least {required} of the following: uppercase letter, lowercase letter, digit, symbol (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password matches a forbidden value.
    #[error("Password must not match {field}")]
    MatchesForbiddenField { field: String },
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length.
    pub min_length: usize,
    /// Minimum number of character classes required (out of 4).
    pub min_complexity: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_complexity: 2,
        }
    }
}

impl PasswordPolicy {
    /// Validates a password against the policy.
    ///
    /// # Arguments
    ///
    /// * `password` - The password to validate
    /// * `username` - The account username (password must not match)
    /// * `email` - The account email (password must not match)
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the password does not meet
    /// policy requirements.
    pub fn validate(
        &self,
        password: &str,
        username: &str,
        email: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password.len() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let complexity: usize = Self::calculate_complexity(password);
        if complexity < self.min_complexity {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_complexity,
                found: complexity,
            });
        }

        // Forbidden values are compared case-insensitively
        let password_lower: String = password.to_lowercase();

        if password_lower == username.to_lowercase() {
            return Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("username"),
            });
        }

        if password_lower == email.to_lowercase() {
            return Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("email"),
            });
        }

        Ok(())
    }

    /// Calculates the complexity score of a password.
    ///
    /// Returns the number of character classes present:
    /// - Uppercase letters
    /// - Lowercase letters
    /// - Digits
    /// - Symbols
    fn calculate_complexity(password: &str) -> usize {
        let mut has_uppercase: bool = false;
        let mut has_lowercase: bool = false;
        let mut has_digit: bool = false;
        let mut has_symbol: bool = false;

        for c in password.chars() {
            if c.is_ascii_uppercase() {
                has_uppercase = true;
            } else if c.is_ascii_lowercase() {
                has_lowercase = true;
            } else if c.is_ascii_digit() {
                has_digit = true;
            } else if c.is_ascii_punctuation() || c.is_ascii_graphic() && !c.is_ascii_alphanumeric()
            {
                has_symbol = true;
            }
        }

        let mut complexity: usize = 0;
        if has_uppercase {
            complexity += 1;
        }
        if has_lowercase {
            complexity += 1;
        }
        if has_digit {
            complexity += 1;
        }
        if has_symbol {
            complexity += 1;
        }

        complexity
    }
}
