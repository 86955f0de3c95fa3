use std::io::Write;
use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use reincarnate::{
  render, FormController, FormFields, Pose, Ratio, ReincarnateConfig, View
};
use reincarnate::endpoint::GenerateVideoClient;

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main()
{   dotenvy::dotenv().ok();
    env_logger::init();

    let config = match ReincarnateConfig::from_env()
    {   Ok(config) => config
      , Err(e) => {
          error!("{}", e);
          eprintln!("{}", e);
          std::process::exit(2);
        }
    };

    match GenerateVideoClient::new(&config.endpoint)
    {   Ok(probe) => match probe.health().await
        {   Ok(true) => info!("Backend is alive")
          , Ok(false) => warn!("Backend did not report alive")
          , Err(e) => warn!("Backend unreachable: {}", e)
        }
      , Err(e) => warn!("Skipping health check: {}", e)
    }

    let controller = match FormController::new(config)
    {   Ok(controller) => controller
      , Err(e) => {
          error!("{}", e);
          eprintln!("{}", e);
          std::process::exit(2);
        }
    };

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop
    {   let fields = match read_form(&mut input).await
        {   Some(fields) => fields
          , None => break
        };

        if reincarnate::validate(&fields).is_ok()
        {   println!("{}", View::Progress);
        }

        if let Err(reincarnate::Error::Validation(errors))
          = controller.submit_and_wait(fields).await
        {   for (field, message) in errors.iter()
            {   println!("  {}: {}", field, message);
            }
        }

        match controller.snapshot().await
        {   Ok(snapshot) => println!("{}\n", render(&snapshot))
          , Err(e) => {
              error!("{}", e);
              break;
            }
        }
    }

    debug!("Input closed");
    if let Err(e) = controller.shutdown().await
    {   warn!("Shutdown: {}", e);
    }
}

/// Prompt for one form; `None` on end of input
async fn read_form(input: &mut Input) -> Option<FormFields>
{   let name = prompt(input, "Who do you want to reincarnate?").await?;
    let text = prompt(input, "What do you want them to say?").await?;
    let pose = prompt(input, "Choose the pose (seating/standing)").await?;
    let ratio = prompt(input, "Choose the format (16:9/9:16)").await?;

    Some(FormFields::new(
      name
    , text
    , choice::<Pose>(&pose)
    , choice::<Ratio>(&ratio)
    ))
}

async fn prompt(input: &mut Input, label: &str) -> Option<String>
{   print!("{}: ", label);
    let _ = std::io::stdout().flush();
    match input.next_line().await
    {   Ok(line) => line
      , Err(e) => {
          error!("Failed to read input: {}", e);
          None
        }
    }
}

/// Empty or unknown answers leave the choice unset
fn choice<T>(answer: &str) -> Option<T>
where
  T: std::str::FromStr<Err = reincarnate::Error>
{   if answer.trim().is_empty()
    {   return None;
    }
    match answer.parse()
    {   Ok(value) => Some(value)
      , Err(e) => {
          println!("  {}", e);
          None
        }
    }
}
