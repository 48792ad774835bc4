//! Note database entity for SeaORM.
//!
//! Tags are stored as a JSON array column.

use sea_orm::entity::prelude::*;

use crate::domain::Note;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub user_id: i32,
    pub folder_id: Option<i32>,
    pub is_favorite: bool,
    pub tags: Json,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::folder::Entity",
        from = "Column::FolderId",
        to = "super::folder::Column::Id",
        on_delete = "SetNull"
    )]
    Folder,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::folder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Note {
    fn from(model: Model) -> Self {
        // A malformed tags column reads as no tags
        let tags = serde_json::from_value(model.tags).unwrap_or_default();

        Note {
            id: model.id,
            title: model.title,
            content: model.content,
            user_id: model.user_id,
            folder_id: model.folder_id,
            is_favorite: model.is_favorite,
            tags,
            timestamp: model.timestamp,
        }
    }
}
