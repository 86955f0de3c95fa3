//! Form fields, the validated generation request, and validation

use std::collections::BTreeMap;
use std::fmt;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Form as the user is filling it in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields
{   /// Who to reincarnate
    pub name: String
  , /// What they should say
    pub text: String
  , /// Selected pose, if any
    pub pose: Option<crate::Pose>
  , /// Selected format, if any
    pub ratio: Option<crate::Ratio>
}

impl FormFields
{   pub fn new(
      name: impl Into<String>
    , text: impl Into<String>
    , pose: Option<crate::Pose>
    , ratio: Option<crate::Ratio>
    ) -> Self
    {   FormFields
        {   name: name.into()
          , text: text.into()
          , pose
          , ratio
        }
    }
}

/// Body of `POST /test/generateVideo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest
{   pub name: String
  , pub text: String
  , pub pose: crate::Pose
  , pub ratio: crate::Ratio
}

/// A form field that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field
{   Name
  , Text
  , Pose
  , Ratio
}

impl Field
{   pub const ALL: [Field; 4]
      = [Field::Name, Field::Text, Field::Pose, Field::Ratio];

    /// Message shown next to the field when it is missing
    pub fn required_message(&self) -> &'static str
    {   match self
        {   Field::Name => "Name is required"
          , Field::Text => "Text is required"
          , Field::Pose => "Pose is required"
          , Field::Ratio => "Ratio is required"
        }
    }
}

impl fmt::Display for Field
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   let name = match self
        {   Field::Name => "name"
          , Field::Text => "text"
          , Field::Pose => "pose"
          , Field::Ratio => "ratio"
        };
        f.write_str(name)
    }
}

/// Per-field validation messages, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors
{   errors: BTreeMap<Field, &'static str>
}

impl ValidationErrors
{   pub fn new() -> Self
    {   ValidationErrors::default()
    }

    pub fn insert(&mut self, field: Field)
    {   self.errors.insert(field, field.required_message());
    }

    pub fn get(&self, field: Field) -> Option<&'static str>
    {   self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool
    {   self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool
    {   self.errors.is_empty()
    }

    pub fn len(&self) -> usize
    {   self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_
    {   self.errors.keys().copied()
    }

    pub fn iter(&self)
      -> impl Iterator<Item = (Field, &'static str)> + '_
    {   self.errors.iter().map(|(f, m)| (*f, *m))
    }
}

impl fmt::Display for ValidationErrors
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   let messages: Vec<&str>
          = self.errors.values().copied().collect();
        f.write_str(&messages.join("; "))
    }
}

/// Check that every field is filled in.
///
/// Text is taken as typed; only an empty string is missing. Every
/// missing field is reported, not only the first.
pub fn validate(fields: &FormFields)
  -> Result<GenerationRequest, ValidationErrors>
{   trace!("Validating {:?}", fields);
    let mut errors = ValidationErrors::new();

    if fields.name.is_empty()
    {   errors.insert(Field::Name);
    }
    if fields.text.is_empty()
    {   errors.insert(Field::Text);
    }
    if fields.pose.is_none()
    {   errors.insert(Field::Pose);
    }
    if fields.ratio.is_none()
    {   errors.insert(Field::Ratio);
    }

    match (fields.pose, fields.ratio)
    {   (Some(pose), Some(ratio)) if errors.is_empty() => {
          Ok(GenerationRequest
          {   name: fields.name.clone()
            , text: fields.text.clone()
            , pose
            , ratio
          })
        }
      , _ => {
          debug!("Validation failed: {}", errors);
          Err(errors)
        }
    }
}
