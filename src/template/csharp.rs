//! C# source renderer for the generated initializer, resolver, enum
//! formatters and client stubs.

use super::TemplateEngine;
use crate::core::{
    Error, MethodDefinition, Result, ServiceInterfaceDefinition, TypeDescriptor, GLOBAL_PREFIX,
};
use crate::emit::{Block, EnumFormatterBlock, InterfaceBlock, RegistrationBlock, ResolverBlock};
use crate::resolver::GenericFormatterEntry;
use std::fmt::Write;

const NIL_TYPE: &str = "global::MessagePack.Nil";
const FORMATTER_INTERFACE: &str = "global::MessagePack.Formatters.IMessagePackFormatter";
const RESOLVER_INTERFACE: &str = "global::MessagePack.IFormatterResolver";
const SUPPRESSED_WARNINGS: &[u32] = &[618, 612, 414, 219, 168];
const ENUM_UNDERLYING_TYPES: &[&str] = &[
    "Byte", "SByte", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64",
];

/// Line writer with block indentation
struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            writeln!(self.out)?;
        } else {
            writeln!(self.out, "{}{}", "    ".repeat(self.depth), text)?;
        }
        Ok(())
    }

    /// Preprocessor directives always start in column zero
    fn directive(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn open(&mut self) -> Result<()> {
        self.line("{")?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        self.line("}")
    }

    fn finish(self) -> String {
        self.out
    }
}

#[derive(Debug, Clone, Default)]
pub struct CSharpTemplateEngine;

impl CSharpTemplateEngine {
    pub fn new() -> Self {
        Self
    }

    fn render_registration(&self, block: &RegistrationBlock) -> Result<String> {
        let mut w = CodeWriter::new();
        write_pragmas(&mut w, "disable")?;
        w.line("")?;
        w.line(&format!("namespace {}", block.namespace))?;
        w.open()?;
        w.line("using global::System;")?;
        w.line("using global::MagicOnion.Client;")?;
        w.line("")?;
        w.line("public static partial class MagicOnionInitializer")?;
        w.open()?;
        w.line("static bool isRegistered = false;")?;
        w.line("")?;
        if !block.unuse_unity_attribute {
            w.directive("#if UNITY_2017_1_OR_NEWER")?;
            w.line("[UnityEngine.RuntimeInitializeOnLoadMethod(UnityEngine.RuntimeInitializeLoadType.BeforeSceneLoad)]")?;
            w.directive("#endif")?;
        }
        w.line("public static void Register()")?;
        w.open()?;
        w.line("if (isRegistered) return;")?;
        w.line("isRegistered = true;")?;
        if !block.services.is_empty() {
            w.line("")?;
        }
        for service in &block.services {
            w.line(&format!(
                "MagicOnionClientRegistry<{}>.Register((x, y, z) => new {}(x, y, z));",
                service.qualified_name(),
                qualified_client_name(service)
            ))?;
        }
        w.close()?;
        w.close()?;
        w.close()?;
        w.line("")?;
        write_pragmas(&mut w, "restore")?;
        Ok(w.finish())
    }

    fn render_resolver(&self, block: &ResolverBlock) -> Result<String> {
        let resolver = &block.resolver_name;
        let helper = format!("{resolver}GetFormatterHelper");

        let mut w = CodeWriter::new();
        write_pragmas(&mut w, "disable")?;
        w.line("")?;
        w.line(&format!("namespace {}", block.namespace))?;
        w.open()?;
        w.line("using System;")?;
        w.line("using MessagePack;")?;
        w.line("")?;
        w.line(&format!("public class {resolver} : {RESOLVER_INTERFACE}"))?;
        w.open()?;
        w.line(&format!(
            "public static readonly {RESOLVER_INTERFACE} Instance = new {resolver}();"
        ))?;
        w.line("")?;
        w.line(&format!("{resolver}()"))?;
        w.open()?;
        w.close()?;
        w.line("")?;
        w.line(&format!("public {FORMATTER_INTERFACE}<T> GetFormatter<T>()"))?;
        w.open()?;
        w.line("return FormatterCache<T>.formatter;")?;
        w.close()?;
        w.line("")?;
        w.line("static class FormatterCache<T>")?;
        w.open()?;
        w.line(&format!(
            "public static readonly {FORMATTER_INTERFACE}<T> formatter;"
        ))?;
        w.line("")?;
        w.line("static FormatterCache()")?;
        w.open()?;
        w.line(&format!("var f = {helper}.GetFormatter(typeof(T));"))?;
        w.line("if (f != null)")?;
        w.open()?;
        w.line(&format!("formatter = ({FORMATTER_INTERFACE}<T>)f;"))?;
        w.close()?;
        w.close()?;
        w.close()?;
        w.close()?;
        w.line("")?;
        w.line(&format!("internal static class {helper}"))?;
        w.open()?;
        w.line("static readonly global::System.Collections.Generic.Dictionary<Type, int> lookup;")?;
        w.line("")?;
        w.line(&format!("static {helper}()"))?;
        w.open()?;
        w.line(&format!(
            "lookup = new global::System.Collections.Generic.Dictionary<Type, int>({})",
            block.registrations.len()
        ))?;
        w.open()?;
        for (index, registration) in block.registrations.iter().enumerate() {
            w.line(&format!("{{typeof({}), {} }},", registration.full_name, index))?;
        }
        w.depth -= 1;
        w.line("};")?;
        w.close()?;
        w.line("")?;
        w.line("internal static object GetFormatter(Type t)")?;
        w.open()?;
        w.line("int key;")?;
        w.line("if (!lookup.TryGetValue(t, out key))")?;
        w.open()?;
        w.line("return null;")?;
        w.close()?;
        w.line("")?;
        w.line("switch (key)")?;
        w.open()?;
        for (index, registration) in block.registrations.iter().enumerate() {
            w.line(&format!(
                "case {}: return {};",
                index, registration.construct_expr
            ))?;
        }
        w.line("default: return null;")?;
        w.close()?;
        w.close()?;
        w.close()?;
        w.close()?;
        w.line("")?;
        write_pragmas(&mut w, "restore")?;
        Ok(w.finish())
    }

    fn render_enum_formatters(&self, block: &EnumFormatterBlock) -> Result<String> {
        let namespace = match &block.namespace {
            Some(ns) => format!("{}.{}", block.formatter_namespace, ns),
            None => block.formatter_namespace.clone(),
        };

        let mut w = CodeWriter::new();
        write_pragmas(&mut w, "disable")?;
        w.line("")?;
        w.line(&format!("namespace {namespace}"))?;
        w.open()?;
        w.line("using System;")?;
        w.line("using MessagePack;")?;
        for entry in &block.entries {
            let full = &entry.full_name;
            let underlying = &entry.underlying_type;
            if !ENUM_UNDERLYING_TYPES.contains(&underlying.as_str()) {
                return Err(Error::Render(format!(
                    "{full}: `{underlying}` is not an integral enum storage type"
                )));
            }
            w.line("")?;
            w.line(&format!(
                "public sealed class {} : {FORMATTER_INTERFACE}<{full}>",
                entry.formatter_name()
            ))?;
            w.open()?;
            w.line(&format!(
                "public int Serialize(ref byte[] bytes, int offset, {full} value, {RESOLVER_INTERFACE} formatterResolver)"
            ))?;
            w.open()?;
            w.line(&format!(
                "return MessagePackBinary.Write{underlying}(ref bytes, offset, ({underlying})value);"
            ))?;
            w.close()?;
            w.line("")?;
            w.line(&format!(
                "public {full} Deserialize(byte[] bytes, int offset, {RESOLVER_INTERFACE} formatterResolver, out int readSize)"
            ))?;
            w.open()?;
            w.line(&format!(
                "return ({full})MessagePackBinary.Read{underlying}(bytes, offset, out readSize);"
            ))?;
            w.close()?;
            w.close()?;
        }
        w.close()?;
        w.line("")?;
        write_pragmas(&mut w, "restore")?;
        Ok(w.finish())
    }

    fn render_interfaces(&self, block: &InterfaceBlock) -> Result<String> {
        let mut w = CodeWriter::new();
        write_pragmas(&mut w, "disable")?;
        w.line("")?;
        if let Some(ns) = &block.namespace {
            w.line(&format!("namespace {ns}"))?;
            w.open()?;
        }
        w.line("using System;")?;
        w.line("using MagicOnion;")?;
        w.line("using MagicOnion.Client;")?;
        for interface in &block.interfaces {
            w.line("")?;
            if interface.is_service_definition {
                write_client(&mut w, interface)?;
            } else {
                write_method_keys(&mut w, interface)?;
            }
        }
        if block.namespace.is_some() {
            w.close()?;
        }
        w.line("")?;
        write_pragmas(&mut w, "restore")?;
        Ok(w.finish())
    }
}

impl TemplateEngine for CSharpTemplateEngine {
    fn render(&self, block: &Block) -> Result<String> {
        match block {
            Block::Registration(b) => self.render_registration(b),
            Block::Resolver(b) => self.render_resolver(b),
            Block::EnumFormatters(b) => self.render_enum_formatters(b),
            Block::Interfaces(b) => self.render_interfaces(b),
        }
    }
}

fn write_pragmas(w: &mut CodeWriter, action: &str) -> Result<()> {
    for code in SUPPRESSED_WARNINGS {
        w.directive(&format!("#pragma warning {action} {code}"))?;
    }
    Ok(())
}

fn write_client(w: &mut CodeWriter, interface: &ServiceInterfaceDefinition) -> Result<()> {
    let client = client_name(&interface.name);
    let contract = interface.qualified_name();

    w.line("[Ignore]")?;
    w.line(&format!(
        "public class {client} : MagicOnionClientBase<{contract}>, {contract}"
    ))?;
    w.open()?;
    w.line(&format!(
        "public {client}(global::Grpc.Core.CallInvoker callInvoker, {RESOLVER_INTERFACE} resolver, global::Grpc.Core.CallOptions option)"
    ))?;
    w.line("    : base(callInvoker, resolver, option)")?;
    w.open()?;
    w.close()?;
    for method in &interface.methods {
        let response = payload_type(&method.response_type);
        let parameters: Vec<String> = method
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.ty.qualified_name(), p.name))
            .collect();
        w.line("")?;
        w.line(&format!(
            "public global::MagicOnion.UnaryResult<{response}> {}({})",
            method.name,
            parameters.join(", ")
        ))?;
        w.open()?;
        w.line(&format!(
            "return InvokeUnary<{}, {response}>(\"{}/{}\", {});",
            request_type(method),
            interface.name,
            method.name,
            request_value(method)
        ))?;
        w.close()?;
    }
    w.close()
}

fn write_method_keys(w: &mut CodeWriter, interface: &ServiceInterfaceDefinition) -> Result<()> {
    w.line(&format!("public static class {}MethodKeys", interface.name))?;
    w.open()?;
    for method in &interface.methods {
        w.line(&format!(
            "public const string {} = \"{}/{}\";",
            method.name, interface.name, method.name
        ))?;
    }
    w.close()
}

/// `IChatService` becomes `ChatServiceClient`
pub fn client_name(interface_name: &str) -> String {
    let mut chars = interface_name.chars();
    let stripped = match (chars.next(), chars.next()) {
        (Some('I'), Some(second)) if second.is_uppercase() => &interface_name[1..],
        _ => interface_name,
    };
    format!("{stripped}Client")
}

fn qualified_client_name(interface: &ServiceInterfaceDefinition) -> String {
    let client = client_name(&interface.name);
    match &interface.namespace {
        Some(ns) => format!("{GLOBAL_PREFIX}{ns}.{client}"),
        None => format!("{GLOBAL_PREFIX}{client}"),
    }
}

fn payload_type(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Primitive { name } if name == "void" => NIL_TYPE.to_string(),
        other => other.qualified_name(),
    }
}

fn request_type(method: &MethodDefinition) -> String {
    match method.parameters.as_slice() {
        [] => NIL_TYPE.to_string(),
        [single] => single.ty.qualified_name(),
        many => GenericFormatterEntry::argument_tuple(many).full_name,
    }
}

fn request_value(method: &MethodDefinition) -> String {
    match method.parameters.as_slice() {
        [] => format!("{NIL_TYPE}.Default"),
        [single] => single.name.clone(),
        many => {
            let names: Vec<&str> = many.iter().map(|p| p.name.as_str()).collect();
            format!("new {}({})", request_type(method), names.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{EmitOptions, ResolverRegistration};
    use crate::resolver::EnumFormatterEntry;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn strip_pragmas(text: &str) -> String {
        text.lines()
            .filter(|l| !l.starts_with("#pragma"))
            .map(|l| format!("{l}\n"))
            .collect::<String>()
            .trim()
            .to_string()
    }

    #[test]
    fn test_client_name() {
        assert_eq!(client_name("IChatService"), "ChatServiceClient");
        assert_eq!(client_name("Inventory"), "InventoryClient");
        assert_eq!(client_name("I"), "IClient");
    }

    #[test]
    fn test_resolver_table() {
        let options = EmitOptions::default();
        let block = Block::Resolver(ResolverBlock {
            namespace: options.resolvers_namespace(),
            formatter_namespace: options.formatters_namespace(),
            resolver_name: options.resolver_name.clone(),
            registrations: vec![ResolverRegistration {
                full_name: "global::Chat.Item[]".into(),
                construct_expr: "new global::MessagePack.Formatters.ArrayFormatter<global::Chat.Item>()"
                    .into(),
            }],
        });

        let text = CSharpTemplateEngine::new().render(&block).unwrap();
        assert!(text.contains("        {typeof(global::Chat.Item[]), 0 },"), "{text}");
        assert!(text.contains(
            "case 0: return new global::MessagePack.Formatters.ArrayFormatter<global::Chat.Item>();"
        ));
        assert!(text.contains("public class MagicOnionResolver : global::MessagePack.IFormatterResolver"));
        assert!(text.starts_with("#pragma warning disable 618\n"));
    }

    #[test]
    fn test_enum_formatter() {
        let block = Block::EnumFormatters(EnumFormatterBlock {
            namespace: Some("Chat".into()),
            formatter_namespace: "MagicOnion.Formatters".into(),
            entries: vec![EnumFormatterEntry {
                name: "Mood".into(),
                namespace: Some("Chat".into()),
                full_name: "global::Chat.Mood".into(),
                underlying_type: "Byte".into(),
            }],
        });

        let text = CSharpTemplateEngine::new().render(&block).unwrap();
        let expected = indoc! {"
            namespace MagicOnion.Formatters.Chat
            {
                using System;
                using MessagePack;

                public sealed class MoodFormatter : global::MessagePack.Formatters.IMessagePackFormatter<global::Chat.Mood>
                {
                    public int Serialize(ref byte[] bytes, int offset, global::Chat.Mood value, global::MessagePack.IFormatterResolver formatterResolver)
                    {
                        return MessagePackBinary.WriteByte(ref bytes, offset, (Byte)value);
                    }

                    public global::Chat.Mood Deserialize(byte[] bytes, int offset, global::MessagePack.IFormatterResolver formatterResolver, out int readSize)
                    {
                        return (global::Chat.Mood)MessagePackBinary.ReadByte(bytes, offset, out readSize);
                    }
                }
            }"};
        assert_eq!(strip_pragmas(&text), expected);
    }

    #[test]
    fn test_enum_with_non_integral_storage_is_rejected() {
        let block = Block::EnumFormatters(EnumFormatterBlock {
            namespace: None,
            formatter_namespace: "MagicOnion.Formatters".into(),
            entries: vec![EnumFormatterEntry {
                name: "Ratio".into(),
                namespace: None,
                full_name: "global::Ratio".into(),
                underlying_type: "Double".into(),
            }],
        });

        let result = CSharpTemplateEngine::new().render(&block);
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_registration_without_unity_attribute() {
        let service = ServiceInterfaceDefinition::new(Some("Chat"), "IChatService", true);
        let block = Block::Registration(RegistrationBlock {
            namespace: "MagicOnion".into(),
            services: vec![service],
            unuse_unity_attribute: true,
        });

        let text = CSharpTemplateEngine::new().render(&block).unwrap();
        assert!(!text.contains("RuntimeInitializeOnLoadMethod"));
        assert!(text.contains(
            "MagicOnionClientRegistry<global::Chat.IChatService>.Register((x, y, z) => new global::Chat.ChatServiceClient(x, y, z));"
        ));
    }

    #[test]
    fn test_client_stub_request_shapes() {
        let service = ServiceInterfaceDefinition::new(None, "IMath", true)
            .with_method(MethodDefinition::new("Ping", TypeDescriptor::primitive("void")))
            .with_method(
                MethodDefinition::new("Sum", TypeDescriptor::primitive("int"))
                    .with_parameter("x", TypeDescriptor::primitive("int"))
                    .with_parameter("y", TypeDescriptor::primitive("int")),
            );
        let block = Block::Interfaces(InterfaceBlock {
            namespace: None,
            interfaces: vec![service],
        });

        let text = CSharpTemplateEngine::new().render(&block).unwrap();
        assert!(text.contains(
            "return InvokeUnary<global::MessagePack.Nil, global::MessagePack.Nil>(\"IMath/Ping\", global::MessagePack.Nil.Default);"
        ), "{text}");
        assert!(text.contains(
            "return InvokeUnary<global::MagicOnion.DynamicArgumentTuple<int, int>, int>(\"IMath/Sum\", new global::MagicOnion.DynamicArgumentTuple<int, int>(x, y));"
        ));
        assert!(text.contains("public class MathClient : MagicOnionClientBase<global::IMath>, global::IMath"));
    }

    #[test]
    fn test_receiver_gets_method_keys() {
        let receiver = ServiceInterfaceDefinition::new(Some("Chat"), "IChatReceiver", false)
            .with_method(MethodDefinition::new("OnJoin", TypeDescriptor::primitive("void")));
        let block = Block::Interfaces(InterfaceBlock {
            namespace: Some("Chat".into()),
            interfaces: vec![receiver],
        });

        let text = CSharpTemplateEngine::new().render(&block).unwrap();
        assert!(text.contains("    public static class IChatReceiverMethodKeys"));
        assert!(text.contains("        public const string OnJoin = \"IChatReceiver/OnJoin\";"));
    }
}
