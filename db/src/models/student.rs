use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{DbConn, IntoActiveModel, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

/// A registered student in the `students` table.
///
/// `register_number` is the external business key used for all
/// cross-referencing (check-ins, lookups, stats); it is unique and never
/// changes after creation. `name` and `year` are mutable display fields.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub register_number: String,
    pub name: String,
    /// Cohort label, free-form (e.g. "1st Year").
    pub year: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new student. A duplicate `register_number` surfaces as a
    /// unique-violation `DbErr`; callers decide whether that is a conflict
    /// (single create) or a silent skip (bulk import).
    pub async fn create(
        db: &DbConn,
        register_number: &str,
        name: &str,
        year: &str,
    ) -> Result<Model, DbErr> {
        let student = ActiveModel {
            register_number: Set(register_number.to_owned()),
            name: Set(name.to_owned()),
            year: Set(year.to_owned()),
            ..Default::default()
        };

        student.insert(db).await
    }

    pub async fn get_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn get_by_register_number(
        db: &DbConn,
        register_number: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RegisterNumber.eq(register_number))
            .one(db)
            .await
    }

    /// Insertion-ordered page of the roster, optionally restricted to a
    /// single cohort.
    pub async fn list(
        db: &DbConn,
        skip: u64,
        limit: u64,
        year: Option<&str>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();
        if let Some(year) = year {
            query = query.filter(Column::Year.eq(year));
        }
        query
            .order_by_asc(Column::Id)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await
    }

    /// Partial update of the mutable fields. An absent or empty value leaves
    /// the field unchanged. Returns `None` when the id does not exist.
    pub async fn update(
        db: &DbConn,
        id: i64,
        name: Option<&str>,
        year: Option<&str>,
    ) -> Result<Option<Model>, DbErr> {
        let Some(existing) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let mut student = existing.clone().into_active_model();
        let mut changed = false;

        if let Some(name) = name.filter(|n| !n.is_empty()) {
            student.name = Set(name.to_owned());
            changed = true;
        }
        if let Some(year) = year.filter(|y| !y.is_empty()) {
            student.year = Set(year.to_owned());
            changed = true;
        }

        if !changed {
            return Ok(Some(existing));
        }
        Ok(Some(student.update(db).await?))
    }

    /// Hard delete. Historical log rows keep their snapshot of this student's
    /// fields and are not touched. Returns `false` when the id did not exist.
    pub async fn delete_by_id(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
