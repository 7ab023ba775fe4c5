//! GetCreditsHandler - Query handler for a caller's credit balance.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SubjectId};
use crate::ports::UserRepository;

/// Query for the credit balance of an authenticated caller.
#[derive(Debug, Clone)]
pub struct GetCreditsQuery {
    pub subject: SubjectId,
}

/// The caller's current balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCreditsResult {
    pub credits: i64,
}

/// Handler for the credit balance query.
///
/// A caller without a record (or without a recorded balance) reads as zero
/// credits rather than an error.
pub struct GetCreditsHandler {
    users: Arc<dyn UserRepository>,
}

impl GetCreditsHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetCreditsQuery) -> Result<GetCreditsResult, DomainError> {
        let credits = self
            .users
            .credit_balance(&query.subject)
            .await?
            .unwrap_or(0);

        Ok(GetCreditsResult { credits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::identity::{User, UserFields};
    use crate::ports::UserRepository;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockUserRepository {
        balances: Mutex<HashMap<String, i64>>,
        fail: bool,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self {
                balances: Mutex::new(HashMap::new()),
                fail: false,
            }
        }

        fn with_balance(subject: &str, credits: i64) -> Self {
            let repo = Self::new();
            repo.balances
                .lock()
                .unwrap()
                .insert(subject.to_string(), credits);
            repo
        }

        fn failing() -> Self {
            Self {
                balances: Mutex::new(HashMap::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_subject(
            &self,
            _subject: &SubjectId,
        ) -> Result<Option<User>, DomainError> {
            Ok(None)
        }

        async fn upsert(&self, _user: &User) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update_fields(
            &self,
            _subject: &SubjectId,
            _fields: &UserFields,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn delete(&self, _subject: &SubjectId) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn credit_balance(
            &self,
            subject: &SubjectId,
        ) -> Result<Option<i64>, DomainError> {
            if self.fail {
                return Err(DomainError::database("Simulated read failure"));
            }
            Ok(self.balances.lock().unwrap().get(subject.as_str()).copied())
        }
    }

    fn query() -> GetCreditsQuery {
        GetCreditsQuery {
            subject: SubjectId::new("user_2abc").unwrap(),
        }
    }

    #[tokio::test]
    async fn returns_stored_balance() {
        let handler = GetCreditsHandler::new(Arc::new(MockUserRepository::with_balance(
            "user_2abc",
            500,
        )));

        let result = handler.handle(query()).await.unwrap();
        assert_eq!(result.credits, 500);
    }

    #[tokio::test]
    async fn unknown_caller_reads_as_zero() {
        let handler = GetCreditsHandler::new(Arc::new(MockUserRepository::new()));

        let result = handler.handle(query()).await.unwrap();
        assert_eq!(result.credits, 0);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let handler = GetCreditsHandler::new(Arc::new(MockUserRepository::failing()));

        let err = handler.handle(query()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
