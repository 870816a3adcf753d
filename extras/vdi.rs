/// Export formats offered by the transfer plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposeFormat {
    Raw,
    Vhd,
}

impl VDI {
    /// Expose this disk over HTTP through the transfer plugin of the first
    /// host in the pool, returning the download URL.
    pub fn expose(&self, format: ExposeFormat) -> Result<String> {
        let host = first_host(&self.client)?;
        let disk_uuid = self.get_uuid()?;

        let args = HashMap::from([
            ("transfer_mode".to_string(), "http".to_string()),
            ("vdi_uuid".to_string(), disk_uuid.clone()),
            ("expose_vhd".to_string(), "true".to_string()),
            ("network_uuid".to_string(), "management".to_string()),
            ("timeout_minutes".to_string(), "5".to_string()),
        ]);
        let handle = host.call_plugin("transfer", "expose", &args)?;

        let args = HashMap::from([("record_handle".to_string(), handle)]);
        let record = host.call_plugin("transfer", "get_record", &args)?;

        let url = url_full_attribute(&record).ok_or_else(|| Error::Decode {
            expected: "transfer record with url_full",
            found: record.clone(),
        })?;

        Ok(match format {
            ExposeFormat::Raw => url.to_string(),
            ExposeFormat::Vhd => format!("{url}.vhd"),
        })
    }

    /// Withdraw an exposure made by [`VDI::expose`].
    pub fn unexpose(&self) -> Result<String> {
        let host = first_host(&self.client)?;
        let disk_uuid = self.get_uuid()?;

        let args = HashMap::from([("vdi_uuid".to_string(), disk_uuid)]);
        host.call_plugin("transfer", "unexpose", &args)
    }
}

fn first_host(client: &Client) -> Result<Host> {
    // Class-level call made before any host handle exists, so only the
    // session is passed.
    let hosts = client.api_call("host.get_all", Vec::new())?.into_string_vec()?;
    match hosts.into_iter().next() {
        Some(reference) => Ok(Host::new(reference, client.clone())),
        None => Err(Error::Decode {
            expected: "at least one host in the pool",
            found: "empty host list".to_string(),
        }),
    }
}

/// Value of the `url_full` attribute of a `<transfer_record .../>` element.
fn url_full_attribute(record: &str) -> Option<&str> {
    let start = record.find("url_full=\"")? + "url_full=\"".len();
    let len = record[start..].find('"')?;
    Some(&record[start..start + len]).filter(|url| !url.is_empty())
}
