//! 参考数据写入
//!
//! clubs / sources 的生命周期不归流水线管理；这里只提供种子数据入口。

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::EntityTrait;

use crate::errors::Result;
use migration::entities::{club, source};

impl super::SeaOrmStorage {
    /// 新增俱乐部，返回 id
    pub async fn insert_club(&self, name: &str, active: bool) -> Result<i64> {
        let model = club::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            active: Set(active),
        };
        let result = club::Entity::insert(model).exec(self.get_db()).await?;
        Ok(result.last_insert_id)
    }

    /// 新增数据来源，返回 id
    pub async fn insert_source(&self, code: &str, name: &str, active: bool) -> Result<i64> {
        let model = source::ActiveModel {
            id: NotSet,
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            active: Set(active),
        };
        let result = source::Entity::insert(model).exec(self.get_db()).await?;
        Ok(result.last_insert_id)
    }
}
