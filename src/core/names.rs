//! Well-known bucket names.
//!
//! IDE generators, the remap step and publishing look these buckets up by
//! their exact name. Renaming any of them breaks those consumers.

/// Buckets owned by this subsystem.
pub mod buckets {
    /// Source form of every mod that is on the compile classpath.
    pub const MOD_COMPILE_CLASSPATH: &str = "modCompileClasspath";

    /// Remapped form of every mod that is on the compile classpath.
    pub const MOD_COMPILE_CLASSPATH_MAPPED: &str = "modCompileClasspathMapped";

    /// The runtime artifact with developer-readable names.
    pub const MINECRAFT_NAMED: &str = "minecraftNamed";

    /// Libraries the runtime artifact itself depends on.
    pub const MINECRAFT_DEPENDENCIES: &str = "minecraftLibraries";

    /// Libraries the mod loader depends on.
    pub const LOADER_DEPENDENCIES: &str = "loaderLibraries";

    /// The runtime artifact as downloaded.
    pub const MINECRAFT: &str = "minecraft";

    /// Jars nested into the packaged output.
    pub const INCLUDE: &str = "include";

    /// Compile-only constants generated from the mappings.
    pub const MAPPING_CONSTANTS: &str = "mappingsConstants";

    /// Mappings as declared by the user.
    pub const MAPPINGS: &str = "mappings";

    /// Mappings after the mapping provider has merged them.
    pub const MAPPINGS_FINAL: &str = "mappingsFinal";

    /// Development-time only dependencies, never published.
    pub const DEVELOPMENT_DEPENDENCIES: &str = "loomDevelopmentDependencies";

    /// Classpath of the constant-unpicking tool.
    pub const UNPICK_CLASSPATH: &str = "unpick";

    /// Runtime-only override for local testing.
    pub const LOCAL_RUNTIME: &str = "localRuntime";

    /// Outgoing variant carrying developer-named outputs.
    pub const NAMED_ELEMENTS: &str = "namedElements";
}

/// Buckets declared by the host's compiled-language conventions.
pub mod host {
    pub const API: &str = "api";
    pub const IMPLEMENTATION: &str = "implementation";
    pub const COMPILE_ONLY: &str = "compileOnly";
    pub const COMPILE_ONLY_API: &str = "compileOnlyApi";
    pub const RUNTIME_ONLY: &str = "runtimeOnly";

    pub const COMPILE_CLASSPATH: &str = "compileClasspath";
    pub const RUNTIME_CLASSPATH: &str = "runtimeClasspath";

    pub const TEST_IMPLEMENTATION: &str = "testImplementation";
    pub const TEST_COMPILE_ONLY: &str = "testCompileOnly";
    pub const TEST_RUNTIME_ONLY: &str = "testRuntimeOnly";
    pub const TEST_COMPILE_CLASSPATH: &str = "testCompileClasspath";
    pub const TEST_RUNTIME_CLASSPATH: &str = "testRuntimeClasspath";

    /// Outgoing variant for consumers compiling against this project.
    pub const API_ELEMENTS: &str = "apiElements";

    /// Outgoing variant for consumers running this project.
    pub const RUNTIME_ELEMENTS: &str = "runtimeElements";
}

/// Plugin identifiers queried on the host's plugin registry.
pub mod plugins {
    /// Primary compiled-language conventions.
    pub const JAVA: &str = "java";

    pub const SCALA: &str = "scala";

    /// Kotlin annotation processing. Must be applied after this subsystem.
    pub const KAPT: &str = "org.jetbrains.kotlin.kapt";
}

/// Task names.
pub mod tasks {
    /// Packages the compiled output.
    pub const JAR: &str = "jar";

    /// Copies resources into the compiled output.
    pub const PROCESS_RESOURCES: &str = "processResources";

    /// Remaps the packaged output back to obfuscated names.
    pub const REMAP_JAR: &str = "remapJar";
}
