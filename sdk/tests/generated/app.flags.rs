// @generated by protoc-gen-flags. DO NOT EDIT.
// source: app/app.proto

impl ::protoflags::Bind for Service {
    /// Registers the flags of `app.Service`.
    #[allow(unused_variables)]
    fn bind<'a>(&'a mut self, fs: &mut ::protoflags::FlagSet<'a>, names: &::protoflags::NameBuilder) -> ::core::result::Result<(), ::protoflags::FlagError> {
        {
            let name = names.build("host");
            fs.var(::protoflags::Plain::new(&mut self.host, ::protoflags::codec::Str), &name, ::core::option::Option::None, "Host to bind")?;
        }
        {
            let name = names.build("port");
            fs.var(::protoflags::Plain::new(&mut self.port, ::protoflags::codec::Int32), &name, ::core::option::Option::Some('p'), "Port to listen on")?;
        }
        {
            let name = names.build("tls-enabled");
            fs.var(::protoflags::Plain::new(&mut self.tls_enabled, ::protoflags::codec::Bool), &name, ::core::option::Option::None, "Serve TLS")?;
        }
        ::core::result::Result::Ok(())
    }
}

impl ::protoflags::SetDefaults for Service {
    fn set_defaults(&mut self) {
        self.port = 8080i32;
    }
}

impl ::protoflags::Bind for Config {
    /// Registers the flags of `app.Config`.
    ///
    /// Fields without a flag: `parent` (not nested).
    #[allow(unused_variables)]
    fn bind<'a>(&'a mut self, fs: &mut ::protoflags::FlagSet<'a>, names: &::protoflags::NameBuilder) -> ::core::result::Result<(), ::protoflags::FlagError> {
        ::protoflags::Bind::bind(self.service.get_or_insert_with(::core::default::Default::default), fs, &names.nested("api"))?;
        {
            let name = names.build("servers");
            fs.var(::protoflags::Repeated::new(&mut self.servers, ::protoflags::codec::Str), &name, ::core::option::Option::None, "Upstream servers")?;
        }
        {
            let name = names.build("log-level");
            fs.var(::protoflags::Plain::new(&mut self.log_level, ::protoflags::codec::Enum::new("LogLevel", &[("LOG_LEVEL_UNSPECIFIED", 0i32), ("LOG_LEVEL_INFO", 1i32), ("LOG_LEVEL_ERROR", 2i32)])), &name, ::core::option::Option::None, "Log level")?;
        }
        {
            let name = names.build("key");
            fs.var(::protoflags::Plain::new(&mut self.key, ::protoflags::codec::Hex), &name, ::core::option::Option::None, "Signing key")?;
        }
        {
            let name = names.build("limits");
            fs.var(::protoflags::StringMap::new(&mut self.limits, ::protoflags::codec::Int64), &name, ::core::option::Option::None, "Resource limits")?;
        }
        {
            let name = names.build("created-at");
            fs.var(::protoflags::Optional::new(&mut self.created_at, ::protoflags::codec::Timestamp::new(&["RFC3339", "RFC1123"])), &name, ::core::option::Option::None, "Creation time")?;
        }
        {
            let name = names.build("timeout");
            fs.var(::protoflags::Optional::new(&mut self.timeout, ::protoflags::codec::Duration), &name, ::core::option::Option::None, "Request timeout")?;
            fs.mark_hidden(&name)?;
        }
        {
            let name = names.build("ratio");
            fs.var(::protoflags::Optional::new(&mut self.ratio, ::protoflags::codec::Double), &name, ::core::option::Option::None, "Sampling ratio")?;
            fs.mark_deprecated(&name, "use --sampling instead")?;
        }
        {
            let name = names.build("labels");
            fs.var(::protoflags::JsonMap::new(&mut self.labels), &name, ::core::option::Option::None, "Labels as JSON")?;
        }
        {
            let name = names.build("debug");
            fs.var(::protoflags::Plain::new(&mut self.debug, ::protoflags::codec::Bool), &name, ::core::option::Option::Some('d'), "Debug mode")?;
        }
        ::core::result::Result::Ok(())
    }
}

impl ::protoflags::SetDefaults for Config {
    fn set_defaults(&mut self) {
        ::protoflags::SetDefaults::set_defaults(self.service.get_or_insert_with(::core::default::Default::default));
        self.ratio = ::core::option::Option::Some(0.25f64);
    }
}
