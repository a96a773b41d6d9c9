use std::sync::Arc;

use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;
use crate::manager::namedobject::NamedJsonObject;

use super::linguisticvariable::LinguisticVariable;
use super::membershipfunction::MembershipShape;
use super::universe::Universe;

#[derive(Deserialize)]
#[serde(untagged)]
enum UniverseJsonProp {
    Range {
        start: f64,
        stop: f64,
        step: f64
    },
    Samples {
        samples: Vec<f64>
    }
}


#[derive(Deserialize)]
struct LinguisticVariableJsonProp {
    name: String,
    universe: UniverseJsonProp,
    terms: Vec<serde_json::Value>
}


// term 物件形如 { "name": "lo", "shape_type": "Triangular", "points": [0, 0, 5] }
fn get_linguistic_variable_from_json(json_value: serde_json::Value) -> Result<Arc<LinguisticVariable>, ManagerError> {
    let json_prop: LinguisticVariableJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
    let universe = match json_prop.universe {
        UniverseJsonProp::Range { start, stop, step } => Universe::build(start, stop, step)?,
        UniverseJsonProp::Samples { samples } => Universe::from_samples(samples)?
    };
    let mut variable = LinguisticVariable::new(json_prop.name, universe);
    for term_json in json_prop.terms {
        let named_object: NamedJsonObject = ManagerError::from_json_or_json_parse_error(term_json.clone())?;
        let shape: MembershipShape = ManagerError::from_json_or_json_parse_error(term_json)?;
        variable.add_term(named_object.name().to_owned(), shape)?;
    }
    Ok(Arc::new(variable))
}


pub struct LinguisticVariableManager;


impl LinguisticVariableManager {
    pub fn new() -> Manager<Arc<LinguisticVariable>> {
        Manager::new(get_linguistic_variable_from_json)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::fuzzyerror::FuzzyError;
    use crate::manager::manager::IManager;

    #[test]
    fn loads_range_and_sample_universes() {
        let mut manager = LinguisticVariableManager::new();
        let json = serde_json::json!([
            {
                "name": "temperature",
                "universe": { "start": 0, "stop": 10, "step": 1 },
                "terms": [
                    { "name": "cold", "shape_type": "Triangular", "points": [0, 0, 5] },
                    { "name": "mild", "shape_type": "Trapezoidal", "points": [2, 4, 6, 8] }
                ]
            },
            {
                "name": "pressure",
                "universe": { "samples": [0.0, 0.5, 2.0, 4.0] },
                "terms": [ { "name": "high", "shape_type": "Triangular", "points": [2, 4, 4] } ]
            }
        ]);
        let values: Vec<serde_json::Value> = serde_json::from_value(json).unwrap();
        manager.insert_obj_from_json_vec(&values).unwrap();

        let temperature = manager.get("temperature").unwrap();
        assert_eq!(temperature.universe().len(), 11);
        assert_eq!(temperature.term("mild").unwrap().fuzzify(3.0), 0.5);
        let pressure = manager.get("pressure").unwrap();
        assert_eq!(pressure.universe().len(), 4);
        assert_eq!(pressure.term("high").unwrap().fuzzify(3.0), 0.5);
        assert!(matches!(manager.get("humidity"), Err(ManagerError::NameNotFoundError(_))));
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let mut manager = LinguisticVariableManager::new();
        let bad_range = serde_json::json!({
            "name": "x", "universe": { "start": 10, "stop": 0, "step": 1 }, "terms": []
        });
        assert!(matches!(
            manager.insert_obj_from_json(bad_range),
            Err(ManagerError::FuzzyError(FuzzyError::InvalidRangeError { .. }))
        ));
        let bad_shape = serde_json::json!({
            "name": "x", "universe": { "start": 0, "stop": 10, "step": 1 },
            "terms": [ { "name": "t", "shape_type": "Triangular", "points": [5, 1, 8] } ]
        });
        assert!(matches!(
            manager.insert_obj_from_json(bad_shape),
            Err(ManagerError::FuzzyError(FuzzyError::InvalidShapeError(_)))
        ));
        let unknown_shape = serde_json::json!({
            "name": "x", "universe": { "start": 0, "stop": 10, "step": 1 },
            "terms": [ { "name": "t", "shape_type": "Gaussian", "points": [5, 1] } ]
        });
        assert!(matches!(
            manager.insert_obj_from_json(unknown_shape),
            Err(ManagerError::JsonParseError(_))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut manager = LinguisticVariableManager::new();
        let json = serde_json::json!({
            "name": "x", "universe": { "start": 0, "stop": 1, "step": 1 }, "terms": []
        });
        manager.insert_obj_from_json(json.clone()).unwrap();
        assert!(matches!(
            manager.insert_obj_from_json(json),
            Err(ManagerError::DuplicateNameError(_))
        ));
    }
}
