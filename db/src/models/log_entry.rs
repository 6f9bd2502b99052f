use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{DbConn, IntoActiveModel, QueryOrder, QuerySelect, SqlErr, TransactionTrait};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::student;

/// One check-in/check-out cycle at a workstation, in the `logs` table.
///
/// `student_id` holds the student's register number, and `student_name` /
/// `year` are snapshots taken at check-in time. The copies deliberately do
/// not track later roster edits, and they survive deletion of the student.
/// A null `check_out_time` marks the session as open.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: String,
    pub student_name: String,
    pub year: String,
    pub computer_number: String,
    pub purpose: String,
    pub check_in_time: DateTimeWithTimeZone,
    pub check_out_time: Option<DateTimeWithTimeZone>,
    pub issues_reported: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Why a check-in was refused.
#[derive(Debug, Error)]
pub enum CheckInError {
    #[error("Student already checked in.")]
    AlreadyCheckedIn,
    #[error("Student not found")]
    StudentNotFound,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Why a check-out was refused.
#[derive(Debug, Error)]
pub enum CheckOutError {
    #[error("Log entry not found")]
    NotFound,
    #[error("Already checked out")]
    AlreadyCheckedOut,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Civil time at the lab's fixed UTC+05:30 offset.
pub fn ist_now() -> DateTime<FixedOffset> {
    let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is in range");
    Utc::now().with_timezone(&ist)
}

impl Model {
    /// Opens a session for the student with the given register number,
    /// snapshotting their current name and year.
    ///
    /// The existing-open-session lookup is a fast path; the partial unique
    /// index on `logs (student_id) WHERE check_out_time IS NULL` is the
    /// actual guard, so a lost race between concurrent check-ins comes back
    /// as a unique violation and is reported as `AlreadyCheckedIn` too.
    pub async fn check_in(
        db: &DbConn,
        register_number: &str,
        computer_number: &str,
        purpose: &str,
    ) -> Result<Model, CheckInError> {
        if Self::active_for_student(db, register_number).await?.is_some() {
            return Err(CheckInError::AlreadyCheckedIn);
        }

        let student = student::Model::get_by_register_number(db, register_number)
            .await?
            .ok_or(CheckInError::StudentNotFound)?;

        let entry = ActiveModel {
            student_id: Set(student.register_number),
            student_name: Set(student.name),
            year: Set(student.year),
            computer_number: Set(computer_number.to_owned()),
            purpose: Set(purpose.to_owned()),
            check_in_time: Set(ist_now()),
            check_out_time: Set(None),
            issues_reported: Set(None),
            ..Default::default()
        };

        match entry.insert(db).await {
            Ok(model) => Ok(model),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(CheckInError::AlreadyCheckedIn),
                _ => Err(CheckInError::Db(e)),
            },
        }
    }

    /// Closes the session, recording the check-out time and any reported
    /// issues. A closed entry is terminal: checking out twice is refused and
    /// the row is left untouched.
    pub async fn check_out(
        db: &DbConn,
        id: i64,
        issues_reported: Option<&str>,
    ) -> Result<Model, CheckOutError> {
        let Some(entry) = Entity::find_by_id(id).one(db).await? else {
            return Err(CheckOutError::NotFound);
        };
        if entry.check_out_time.is_some() {
            return Err(CheckOutError::AlreadyCheckedOut);
        }

        let mut entry = entry.into_active_model();
        entry.check_out_time = Set(Some(ist_now()));
        if let Some(issues) = issues_reported.filter(|s| !s.is_empty()) {
            entry.issues_reported = Set(Some(issues.to_owned()));
        }

        Ok(entry.update(db).await?)
    }

    pub async fn get_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// The single open entry for a student, if any.
    pub async fn active_for_student(
        db: &DbConn,
        register_number: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(register_number))
            .filter(Column::CheckOutTime.is_null())
            .one(db)
            .await
    }

    /// All closed entries for a student, in insertion order. Feeds the usage
    /// statistics.
    pub async fn closed_for_student(
        db: &DbConn,
        register_number: &str,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(register_number))
            .filter(Column::CheckOutTime.is_not_null())
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Insertion-ordered page over the whole log table.
    pub async fn list(db: &DbConn, skip: u64, limit: u64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::Id)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await
    }

    /// Deletes every log entry inside one transaction; returns the count.
    pub async fn delete_all(db: &DbConn) -> Result<u64, DbErr> {
        let txn = db.begin().await?;
        let res = Entity::delete_many().exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected)
    }

    /// Deletes the given entries inside one transaction; returns the count.
    /// Unknown ids are simply not counted.
    pub async fn delete_by_ids(db: &DbConn, ids: &[i64]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }
        let txn = db.begin().await?;
        let res = Entity::delete_many()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(res.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveModel, CheckInError, CheckOutError, Model as LogEntry, ist_now};
    use crate::models::student::Model as Student;
    use crate::test_utils::setup_test_db;
    use sea_orm::ActiveModelTrait;
    use sea_orm::ActiveValue::Set;
    use sea_orm::SqlErr;

    async fn seed_student(db: &sea_orm::DbConn, register_number: &str) -> Student {
        Student::create(db, register_number, "John Doe", "1st Year")
            .await
            .expect("Failed to create student")
    }

    #[tokio::test]
    async fn check_in_snapshots_student_fields() {
        let db = setup_test_db().await;
        let student = seed_student(&db, "21CS101").await;

        let entry = LogEntry::check_in(&db, "21CS101", "PC-01", "Research")
            .await
            .unwrap();

        assert_eq!(entry.student_id, "21CS101");
        assert_eq!(entry.student_name, "John Doe");
        assert_eq!(entry.year, "1st Year");
        assert_eq!(entry.computer_number, "PC-01");
        assert_eq!(entry.purpose, "Research");
        assert!(entry.check_out_time.is_none());
        assert!(entry.issues_reported.is_none());

        // Later roster edits must not leak into the snapshot.
        Student::update(&db, student.id, Some("Renamed"), Some("2nd Year"))
            .await
            .unwrap();
        let unchanged = LogEntry::get_by_id(&db, entry.id).await.unwrap().unwrap();
        assert_eq!(unchanged.student_name, "John Doe");
        assert_eq!(unchanged.year, "1st Year");
    }

    #[tokio::test]
    async fn second_check_in_is_refused_while_open() {
        let db = setup_test_db().await;
        seed_student(&db, "21CS101").await;

        LogEntry::check_in(&db, "21CS101", "PC-01", "Research")
            .await
            .unwrap();
        let err = LogEntry::check_in(&db, "21CS101", "PC-02", "Assignment")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckInError::AlreadyCheckedIn));

        // No second row was created.
        let all = LogEntry::list(&db, 0, 100).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn check_in_unknown_student_is_refused() {
        let db = setup_test_db().await;

        let err = LogEntry::check_in(&db, "21CS999", "PC-01", "Research")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckInError::StudentNotFound));
    }

    #[tokio::test]
    async fn check_out_closes_and_is_terminal() {
        let db = setup_test_db().await;
        seed_student(&db, "21CS101").await;

        let entry = LogEntry::check_in(&db, "21CS101", "PC-01", "Research")
            .await
            .unwrap();

        let closed = LogEntry::check_out(&db, entry.id, Some("Mouse broken"))
            .await
            .unwrap();
        assert!(closed.check_out_time.is_some());
        assert_eq!(closed.issues_reported.as_deref(), Some("Mouse broken"));

        // A second check-out is refused and must not alter the row.
        let err = LogEntry::check_out(&db, entry.id, Some("other issue"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckOutError::AlreadyCheckedOut));

        let unchanged = LogEntry::get_by_id(&db, entry.id).await.unwrap().unwrap();
        assert_eq!(unchanged.check_out_time, closed.check_out_time);
        assert_eq!(unchanged.issues_reported.as_deref(), Some("Mouse broken"));

        // The student can open a fresh session once the old one is closed.
        LogEntry::check_in(&db, "21CS101", "PC-02", "Assignment")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn check_out_with_empty_issues_leaves_null() {
        let db = setup_test_db().await;
        seed_student(&db, "21CS101").await;

        let entry = LogEntry::check_in(&db, "21CS101", "PC-01", "Research")
            .await
            .unwrap();
        let closed = LogEntry::check_out(&db, entry.id, Some("")).await.unwrap();
        assert!(closed.issues_reported.is_none());

        let err = LogEntry::check_out(&db, 9999, None).await.unwrap_err();
        assert!(matches!(err, CheckOutError::NotFound));
    }

    #[tokio::test]
    async fn active_and_closed_queries_split_on_checkout_time() {
        let db = setup_test_db().await;
        seed_student(&db, "21CS101").await;

        let entry = LogEntry::check_in(&db, "21CS101", "PC-01", "Research")
            .await
            .unwrap();
        let active = LogEntry::active_for_student(&db, "21CS101")
            .await
            .unwrap()
            .expect("session should be open");
        assert_eq!(active.id, entry.id);
        assert!(LogEntry::closed_for_student(&db, "21CS101").await.unwrap().is_empty());

        LogEntry::check_out(&db, entry.id, None).await.unwrap();
        assert!(
            LogEntry::active_for_student(&db, "21CS101")
                .await
                .unwrap()
                .is_none()
        );
        let closed = LogEntry::closed_for_student(&db, "21CS101").await.unwrap();
        assert_eq!(closed.len(), 1);
    }

    #[tokio::test]
    async fn store_rejects_second_open_row_even_without_the_fast_path() {
        let db = setup_test_db().await;
        seed_student(&db, "21CS101").await;

        LogEntry::check_in(&db, "21CS101", "PC-01", "Research")
            .await
            .unwrap();

        // Insert directly, bypassing the existence check, to prove the
        // partial unique index holds the invariant on its own.
        let raced = ActiveModel {
            student_id: Set("21CS101".to_owned()),
            student_name: Set("John Doe".to_owned()),
            year: Set("1st Year".to_owned()),
            computer_number: Set("PC-02".to_owned()),
            purpose: Set("Research".to_owned()),
            check_in_time: Set(ist_now()),
            check_out_time: Set(None),
            issues_reported: Set(None),
            ..Default::default()
        };
        let err = raced.insert(&db).await.unwrap_err();
        assert!(matches!(
            err.sql_err(),
            Some(SqlErr::UniqueConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn bulk_deletes_return_counts() {
        let db = setup_test_db().await;
        seed_student(&db, "21CS101").await;
        seed_student(&db, "21CS102").await;

        let first = LogEntry::check_in(&db, "21CS101", "PC-01", "Research")
            .await
            .unwrap();
        LogEntry::check_in(&db, "21CS102", "PC-02", "Assignment")
            .await
            .unwrap();

        assert_eq!(LogEntry::delete_by_ids(&db, &[]).await.unwrap(), 0);
        assert_eq!(
            LogEntry::delete_by_ids(&db, &[first.id, 9999]).await.unwrap(),
            1
        );
        assert_eq!(LogEntry::delete_all(&db).await.unwrap(), 1);
        assert!(LogEntry::list(&db, 0, 100).await.unwrap().is_empty());
    }
}
