use super::{DefinitionTable, Palette};

pub const GRPC_API: DefinitionTable = DefinitionTable {
    name: "grpc",
    palette: Palette::Grpc,
    entries: &[
        ("grpc", "module @grpc/grpc-js", "Pure JavaScript gRPC client and server."),
        ("Server", "class grpc.Server", "A gRPC server that hosts one or more services."),
        (
            "ServerCredentials",
            "class grpc.ServerCredentials",
            "Transport security settings for a server.",
        ),
        (
            "credentials",
            "namespace grpc.credentials",
            "Factories for channel and call credentials.",
        ),
        ("Metadata", "class grpc.Metadata", "Key/value pairs sent alongside a call."),
        ("status", "enum grpc.status", "Canonical gRPC status codes."),
        (
            "ServerUnaryCall",
            "interface ServerUnaryCall<Req, Res>",
            "Server-side handle for a unary call.",
        ),
        (
            "ServerWritableStream",
            "interface ServerWritableStream<Req, Res>",
            "Server-side handle for a server-streaming call.",
        ),
        ("sendUnaryData", "type sendUnaryData<Res>", "Callback used to answer a unary call."),
        (
            "makeClientConstructor",
            "makeClientConstructor(methods, serviceName): ServiceClientConstructor",
            "Builds a client class from a service definition.",
        ),
        (
            "loadPackageDefinition",
            "loadPackageDefinition(packageDef): GrpcObject",
            "Turns a loaded proto package into client constructors.",
        ),
        (
            "protoLoader",
            "module @grpc/proto-loader",
            "Loads `.proto` files into package definitions.",
        ),
        (
            "loadSync",
            "protoLoader.loadSync(filename, options?): PackageDefinition",
            "Synchronously parses `.proto` files.",
        ),
        (
            "addService",
            "Server.addService(service, implementation): void",
            "Registers handlers for a service.",
        ),
        (
            "bindAsync",
            "Server.bindAsync(port, creds, callback): void",
            "Binds the server to a port.",
        ),
    ],
};
