impl Network {
    /// Whether this is the host-internal management network.
    ///
    /// A network whose `other_config` cannot be read is not one.
    pub fn is_host_internal_management_network(&self) -> bool {
        self.get_other_config()
            .map(|config| {
                config
                    .get("is_host_internal_management_network")
                    .is_some_and(|flag| flag == "true")
            })
            .unwrap_or(false)
    }
}
