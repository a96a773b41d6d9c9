pub mod configuration;

pub mod classification {
    pub mod classifier;
}

pub mod fuzzy {
    pub mod fuzzyerror;
    pub mod universe;
    pub mod fuzzifier;
    pub mod fuzzyset;
    pub mod membershipfunction;
    pub mod linguisticvariable;
    pub mod linguisticvariablemanager;
}

pub mod inference {
    pub mod expression;
    pub mod rule;
    pub mod ruleparser;
    pub mod ruleengine;
    pub mod aggregator;
    pub mod defuzzifier;
    pub mod inferencesystem;
}

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
        }
    }
}
