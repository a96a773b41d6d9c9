use serde::Deserialize;

/// 只讀取 JSON 物件中的 `name` 欄位，用來決定 manager 的 key。
#[derive(Clone, Deserialize)]
pub struct NamedJsonObject {
    name: String
}


impl NamedJsonObject {
    pub fn name(&self) -> &String {
        &self.name
    }
}
