use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    convert::TryFrom,
};

/// Typed view over one JSON object of light parameters. The scene side hands
/// lights over as loosely typed key/value blobs; everything is pulled out
/// through these accessors exactly once, at descriptor build time, so the
/// sampling core never does string-keyed lookups.
pub struct InputParams {
    params: HashMap<String, InputParamsValue>,
    name: Cow<'static, str>,
    visited_names: HashSet<String>,
}

pub enum InputParamsValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
    Array(Vec<InputParamsValue>),
}

macro_rules! params_get {
    ( $( ( $name:ident, $type:ty, $variant:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[allow(dead_code)]
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<$type> {
                    if let Some(value) = self.params.get(key) {
                        if let InputParamsValue::$variant(value) = value {
                            self.visited_names.insert(key.to_owned());
                            return Ok(*value);
                        }
                        anyhow::bail!(format!("{} - '{}' should be {}", self.name, key, $hint));
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                #[allow(dead_code)]
                pub fn [<get_ $name _or>](&mut self, key: &str, fallback: $type) -> $type {
                    if let Ok(value) = self.[<get_ $name>](key) {
                        value
                    } else {
                        fallback
                    }
                }
            }
        )+
    };
}

macro_rules! params_get_vec {
    ( $( ( $name:ident, $type:ty, $len:expr, $variant:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[allow(dead_code)]
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<[$type; $len]> {
                    if let Some(value) = self.params.get(key) {
                        let error_info = format!(
                            "{} - '{}' should be array with {} {}s",
                            self.name,
                            key,
                            $len,
                            $hint,
                        );
                        if let InputParamsValue::Array(arr) = value {
                            if arr.len() == $len {
                                let mut result = [$type::default(); $len];
                                for i in 0..$len {
                                    if let InputParamsValue::$variant(ele) = arr[i] {
                                        result[i] = ele;
                                    } else {
                                        anyhow::bail!(error_info.clone());
                                    }
                                }
                                self.visited_names.insert(key.to_owned());
                                return Ok(result);
                            }
                        }
                        anyhow::bail!(error_info);
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                #[allow(dead_code)]
                pub fn [<get_ $name _or>](
                    &mut self,
                    key: &str,
                    fallback: [$type; $len],
                ) -> [$type; $len] {
                    if let Ok(value) = self.[<get_ $name>](key) {
                        value
                    } else {
                        fallback
                    }
                }
            }
        )+
    };
}

impl InputParams {
    pub fn set_name(&mut self, name: Cow<'static, str>) {
        self.name = name;
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    params_get! {
        (int, i32, Int, "integer"),
        (float, f32, Float, "float"),
        (bool, bool, Bool, "boolean"),
    }

    params_get_vec! {
        (float3, f32, 3, Float, "float"),
        (float4, f32, 4, Float, "float"),
    }

    /// 16 floats in column-major order.
    pub fn get_matrix(&mut self, key: &str) -> anyhow::Result<glam::Mat4> {
        if let Some(value) = self.params.get(key) {
            if let InputParamsValue::Array(arr) = value {
                let error_info =
                    format!("{} - '{}' should be an array of 16 floats", self.name, key);
                if arr.len() == 16 {
                    let mut elements = [0.0_f32; 16];
                    for i in 0..16 {
                        match arr[i] {
                            InputParamsValue::Float(ele) => elements[i] = ele,
                            InputParamsValue::Int(ele) => elements[i] = ele as f32,
                            _ => anyhow::bail!(error_info),
                        }
                    }
                    self.visited_names.insert(key.to_owned());
                    return Ok(glam::Mat4::from_cols_array(&elements));
                }
                anyhow::bail!(error_info);
            }
            anyhow::bail!(format!("{} - '{}' should be an array", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    pub fn get_str(&mut self, key: &str) -> anyhow::Result<String> {
        if let Some(value) = self.params.get(key) {
            if let InputParamsValue::String(value) = value {
                self.visited_names.insert(key.to_owned());
                return Ok(value.clone());
            }
            anyhow::bail!(format!("{} - '{}' should be string", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    pub fn get_str_or(&mut self, key: &str, fallback: &str) -> String {
        if let Ok(value) = self.get_str(key) {
            value
        } else {
            fallback.to_owned()
        }
    }

    pub fn check_unused_keys(&self) {
        for k in self.params.keys() {
            if !k.starts_with('#') && !self.visited_names.contains(k) {
                log::warn!("{} - unused key '{}'", self.name, k);
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParamsValue {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => {
                anyhow::bail!("can't convert to InputParamsValue from null json")
            }
            serde_json::Value::Bool(v) => Ok(Self::Bool(*v)),
            serde_json::Value::Number(v) => {
                if let Some(v) = v.as_i64() {
                    Ok(Self::Int(v as i32))
                } else {
                    Ok(Self::Float(v.as_f64().unwrap() as f32))
                }
            }
            serde_json::Value::String(v) => Ok(Self::String(v.clone())),
            serde_json::Value::Array(arr) => {
                let mut values = Vec::<InputParamsValue>::with_capacity(arr.len());
                for v in arr {
                    match Self::try_from(v) {
                        Ok(v) => values.push(v),
                        Err(e) => {
                            anyhow::bail!(format!("can't convert array element: {}", e))
                        }
                    }
                }
                Ok(Self::Array(values))
            }
            serde_json::Value::Object(_) => {
                anyhow::bail!("can't convert to InputParamsValue from object json")
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParams {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        if let serde_json::Value::Object(value) = value {
            let mut params = HashMap::<String, InputParamsValue>::with_capacity(value.len());
            for (k, v) in value {
                match InputParamsValue::try_from(v) {
                    Ok(v) => {
                        params.insert(k.clone(), v);
                    }
                    Err(e) => {
                        anyhow::bail!(format!("can't convert member '{}': {}", k, e))
                    }
                }
            }
            Ok(Self {
                params,
                name: Cow::Owned("".to_owned()),
                visited_names: HashSet::new(),
            })
        } else {
            anyhow::bail!("can't convert to InputParams from non-object json value");
        }
    }
}
