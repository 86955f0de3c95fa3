use reincarnate::client::FormSnapshot;
use reincarnate::{
  render, submit_label, validate, EndpointConfig, Error, Field, FormFields,
  GenerationRequest, MediaRef, Pose, Ratio, ReincarnateConfig,
  ResponseContract, View
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

fn filled() -> FormFields
{   FormFields::new(
      "Napoleon"
    , "Hello world"
    , Some(Pose::Standing)
    , Some(Ratio::Landscape)
    )
}

#[test]
fn test_validate_complete_form()
{   let request = assert_ok!(validate(&filled()));
    assert_eq!(
      request
    , GenerationRequest
      {   name: "Napoleon".to_string()
        , text: "Hello world".to_string()
        , pose: Pose::Standing
        , ratio: Ratio::Landscape
      }
    );
}

#[test]
fn test_validate_empty_form_reports_every_field()
{   let errors = assert_err!(validate(&FormFields::default()));
    assert_eq!(errors.len(), 4);
    let messages: Vec<&str> = errors.iter().map(|(_, m)| m).collect();
    assert_eq!(
      messages
    , vec![
        "Name is required"
      , "Text is required"
      , "Pose is required"
      , "Ratio is required"
      ]
    );
}

#[test]
fn test_validate_keeps_whitespace_as_typed()
{   let mut fields = filled();
    fields.name = " ".to_string();
    fields.text = "   \t".to_string();
    let request = assert_ok!(validate(&fields));
    assert_eq!(request.name, " ");
    assert_eq!(request.text, "   \t");

    fields.text.clear();
    let errors = assert_err!(validate(&fields));
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Text]);
    assert_eq!(errors.to_string(), "Text is required");
}

#[test]
fn test_request_wire_format()
{   let request = assert_ok!(validate(&FormFields::new(
      "Ada"
    , "Numbers"
    , Some(Pose::Seating)
    , Some(Ratio::Portrait)
    )));
    assert_eq!(
      serde_json::to_value(&request).unwrap()
    , json!({
        "name": "Ada",
        "text": "Numbers",
        "pose": "seating",
        "ratio": "9:16"
      })
    );
}

#[test]
fn test_choices_parse_from_text()
{   assert_eq!(assert_ok!(" Standing ".parse::<Pose>()), Pose::Standing);
    assert_eq!(assert_ok!("seating".parse::<Pose>()), Pose::Seating);
    assert_eq!(assert_ok!("16:9".parse::<Ratio>()), Ratio::Landscape);
    assert_eq!(assert_ok!("9:16".parse::<Ratio>()), Ratio::Portrait);
    assert!(matches!(
      "lying".parse::<Pose>()
    , Err(Error::ParseError(_))
    ));
    assert!("4:3".parse::<Ratio>().is_err());
}

#[test]
fn test_render_states()
{   let idle = FormSnapshot::default();
    assert_eq!(render(&idle), View::Placeholder { notice: None });
    assert_eq!(render(&idle).to_string(), "No video available");
    assert_eq!(submit_label(&idle), "Generate");
    assert!(idle.submit_enabled());

    let media = MediaRef::Url("https://example.com/v.mp4".to_string());
    let busy = FormSnapshot
    {   is_submitting: true
      , result: Some(media.clone())
      , ..FormSnapshot::default()
    };
    assert_eq!(render(&busy), View::Progress);
    assert_eq!(submit_label(&busy), "Generating...");

    let ready = FormSnapshot
    {   result: Some(media.clone())
      , ..FormSnapshot::default()
    };
    assert_eq!(render(&ready), View::Player { media, notice: None });
    assert_eq!(
      render(&ready).to_string()
    , "Video available at https://example.com/v.mp4"
    );
}

#[test]
fn test_config_defaults()
{   let config = ReincarnateConfig::default();
    assert_eq!(config.endpoint.response_contract, ResponseContract::Binary);
    assert_eq!(
      assert_ok!(config.endpoint.generate_url()).as_str()
    , "http://localhost:5140/test/generateVideo"
    );
    assert_eq!(
      assert_ok!(config.endpoint.health_url()).as_str()
    , "http://localhost:5140/health"
    );
    assert_ok!(config.validate());
}

#[test]
fn test_config_from_json()
{   let config = assert_ok!(ReincarnateConfig::from_json_str(r#"{
      "endpoint": {
        "api_base": "https://videos.example.com/",
        "response_contract": "linked"
      },
      "media_dir": "/tmp/videos"
    }"#));
    assert_eq!(config.endpoint.response_contract, ResponseContract::Linked);
    assert_eq!(
      assert_ok!(config.endpoint.generate_url()).as_str()
    , "https://videos.example.com/test/generateVideo"
    );
    assert_eq!(
      config.media_dir.as_deref()
    , Some(std::path::Path::new("/tmp/videos"))
    );
}

#[test]
fn test_config_rejects_bad_endpoint()
{   let bad = ReincarnateConfig::new(EndpointConfig::with_base("not a url"));
    assert!(matches!(
      bad.validate()
    , Err(Error::InvalidConfiguration(_))
    ));

    let ftp = ReincarnateConfig::new(
      EndpointConfig::with_base("ftp://videos.example.com")
    );
    assert!(ftp.validate().is_err());

    assert!(matches!(
      ReincarnateConfig::from_json_str(r#"{ "endpoint": {
        "api_base": "http://x", "response_contract": "smoke-signals"
      } }"#)
    , Err(Error::InvalidConfiguration(_))
    ));
}
