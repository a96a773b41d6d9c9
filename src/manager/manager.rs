use std::collections::HashMap;

use tracing::debug;

use super::managererror::ManagerError;
use super::namedobject::NamedJsonObject;


/// 以名稱索引、由 JSON 建構物件的容器。
///
/// 載入階段使用 `&mut self`；載入完成後僅以 `&self` 唯讀存取，
/// 因此只要 `V: Send + Sync`，manager 本身即可跨執行緒共享。
pub trait IManager<V> where 
    V: Clone {
    fn map(&self) -> &HashMap<String, V>;

    fn insert(&mut self, name: String, obj: V) -> Result<(), ManagerError>;
    
    fn insert_obj_from_json(&mut self, 
                            json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map()
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.map().contains_key(name)
    }

    fn insert_obj_from_json_vec(&mut self, 
                                json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {                
        for j in json_vec.iter() {
            self.insert_obj_from_json(j.clone())?;
        }
        Ok(())
    }
}


pub struct Manager<V> {
    map: HashMap<String, V>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>
}


impl <V> Manager<V> where 
    V: Clone {
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager {map: HashMap::new(), get_obj_from_json}
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.map.values()
    }
}

impl <V> IManager<V> for Manager<V> where 
    V: Clone {
    fn map(&self) -> &HashMap<String, V> {
        &self.map
    }

    fn insert(&mut self, name: String, obj: V) -> Result<(), ManagerError> {
        if self.map.contains_key(&name) {
            return Err(ManagerError::DuplicateNameError(name));
        }
        self.map.insert(name, obj);
        Ok(())
    }

    fn insert_obj_from_json(&mut self, 
                            json_value: serde_json::Value) -> Result<(), ManagerError> {   
        let named_object: NamedJsonObject = ManagerError::from_json_or_json_parse_error(json_value.clone())?; 
        let v = (self.get_obj_from_json)(json_value)?;
        debug!(name = %named_object.name(), "object loaded");
        self.insert(named_object.name().to_owned(), v)
    }
} 
