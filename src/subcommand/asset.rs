use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Asset {
  #[arg(help = "Convert <ASSET>, a name like `SOUP` or `A95428956661682177`, or a numeric id.")]
  asset: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub name: String,
  pub id: u64,
  pub numeric: bool,
}

impl Asset {
  pub(crate) fn run(self) -> SubcommandResult {
    Ok(Some(Box::new(self.output()?)))
  }

  fn output(&self) -> Result<Output> {
    let asset = if self.asset.chars().all(|c| c.is_ascii_digit()) {
      AssetId(
        self
          .asset
          .parse()
          .with_context(|| format!("invalid asset id `{}`", self.asset))?,
      )
    } else {
      self.asset.parse::<AssetId>()?
    };

    Ok(Output {
      name: asset.to_string(),
      id: asset.n(),
      numeric: asset.is_numeric(),
    })
  }
}
